//! Header-only image metadata and validation.

use log::warn;

use crate::error::BmpError;
use crate::header::{
    COMPRESSION_RGB, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader, PIXEL_DATA_OFFSET,
};
use crate::pixel::PixelLayout;

/// Image metadata obtained from validated headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Width in pixels. A non-positive declared width is reported as 0.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Stored pixel layout.
    pub layout: PixelLayout,
    /// Padding bytes after each stored row.
    pub row_padding: usize,
    /// Offset of the first pixel row from the start of the file.
    pub pixel_offset: u32,
    /// File size declared in the file header.
    pub file_size: u32,
}

impl ImageInfo {
    /// Validate both headers and derive the geometry.
    ///
    /// Checks run in a fixed order: signature, header variant, planes,
    /// bit depth, orientation, compression. The first failure wins.
    pub fn from_headers(file: &FileHeader, info: &InfoHeader) -> Result<Self, BmpError> {
        if !file.has_valid_signature() {
            return Err(BmpError::BadSignature {
                found: file.signature,
            });
        }
        if info.header_size as usize != INFO_HEADER_LEN {
            return Err(BmpError::UnsupportedHeaderVariant {
                size: info.header_size,
            });
        }
        if info.planes != 1 {
            return Err(BmpError::UnsupportedPlaneCount {
                planes: info.planes,
            });
        }
        let layout = PixelLayout::from_bits_per_pixel(info.bits_per_pixel).ok_or(
            BmpError::UnsupportedBitDepth {
                bits: info.bits_per_pixel,
            },
        )?;
        if info.height <= 0 {
            return Err(BmpError::UnsupportedOrientation {
                height: info.height,
            });
        }
        if info.compression != COMPRESSION_RGB {
            return Err(BmpError::UnsupportedCompression {
                method: info.compression,
            });
        }

        if info.width <= 0 {
            warn!("BMP declares width {}, pixel buffer will be empty", info.width);
        }
        if (file.pixel_offset as usize) < PIXEL_DATA_OFFSET {
            warn!(
                "BMP pixel offset {} points inside the {PIXEL_DATA_OFFSET}-byte headers",
                file.pixel_offset
            );
        }

        let width = info.width.max(0) as u32;
        Ok(Self {
            width,
            height: info.height as u32,
            layout,
            row_padding: layout.row_padding(width as usize),
            pixel_offset: file.pixel_offset,
            file_size: file.file_size,
        })
    }

    /// Bits per pixel (24 or 32).
    pub fn bits_per_pixel(&self) -> u16 {
        self.layout.bits_per_pixel()
    }

    /// Bytes per pixel (3 or 4).
    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// Whether pixels carry an alpha byte.
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Unpadded bytes per row.
    pub fn row_bytes(&self) -> u64 {
        self.width as u64 * self.bytes_per_pixel() as u64
    }

    /// Size of the decoded pixel buffer in bytes.
    pub fn buffer_bytes(&self) -> u64 {
        self.row_bytes() * self.height as u64
    }
}

/// Parse and validate the headers at the start of `data` without touching
/// the pixel rows.
///
/// Applies the same checks as a full decode, so a successful probe means
/// only missing pixel data can still make decoding fail.
pub fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    let file_bytes: [u8; FILE_HEADER_LEN] = data
        .get(..FILE_HEADER_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(BmpError::TruncatedData {
            context: "file header",
        })?;
    let file = FileHeader::from(file_bytes);
    if !file.has_valid_signature() {
        return Err(BmpError::BadSignature {
            found: file.signature,
        });
    }

    let info_bytes: [u8; INFO_HEADER_LEN] = data
        .get(FILE_HEADER_LEN..PIXEL_DATA_OFFSET)
        .and_then(|b| b.try_into().ok())
        .ok_or(BmpError::TruncatedData {
            context: "info header",
        })?;
    ImageInfo::from_headers(&file, &InfoHeader::from(info_bytes))
}
