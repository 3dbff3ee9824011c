//! BMP decoding.
//!
//! [`Decoder`] carries the per-operation settings (resource limits and a
//! cooperative stop token) and turns a seekable byte stream into a
//! [`BitmapImage`]. Either the whole image decodes or an error is returned;
//! no partially filled image ever escapes.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use enough::{Stop, Unstoppable};
use log::{debug, warn};

use crate::error::BmpError;
use crate::header::{FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader};
use crate::image::BitmapImage;
use crate::info::ImageInfo;
use crate::limits::Limits;

/// Decode settings for one or more BMP decodes.
///
/// ```no_run
/// use zenbmp::{Decoder, Limits};
///
/// let image = Decoder::new()
///     .with_limits(Limits::none().with_max_pixels(16_000_000))
///     .decode_path("input.bmp")?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Decoder<'a> {
    limits: Limits,
    stop: &'a dyn Stop,
}

impl Default for Decoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Decoder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decoder")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl<'a> Decoder<'a> {
    /// Decoder with no limits that never stops early.
    pub fn new() -> Self {
        Self {
            limits: Limits::none(),
            stop: &Unstoppable,
        }
    }

    /// Apply resource limits, checked before the pixel buffer is allocated.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set a cooperative cancellation token, checked once per pixel row.
    pub fn with_stop(mut self, stop: &'a dyn Stop) -> Self {
        self.stop = stop;
        self
    }

    /// Limits this decoder enforces.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Decode an in-memory BMP file.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<BitmapImage, BmpError> {
        self.decode(&mut Cursor::new(data))
    }

    /// Open and decode a BMP file from disk.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<BitmapImage, BmpError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("decoding {}", path.display());
        self.decode(&mut BufReader::new(file))
    }

    /// Decode a BMP file whose first byte is at the reader's current position.
    ///
    /// The pixel data offset from the file header is taken relative to that
    /// position.
    pub fn decode<R: Read + Seek>(&self, reader: &mut R) -> Result<BitmapImage, BmpError> {
        let start = reader.stream_position()?;

        let mut file_bytes = [0u8; FILE_HEADER_LEN];
        reader
            .read_exact(&mut file_bytes)
            .map_err(|e| BmpError::from_read(e, "file header"))?;
        let file_header = FileHeader::from(file_bytes);
        // Reject non-BMP input before reading the 40-byte info header.
        if !file_header.has_valid_signature() {
            return Err(BmpError::BadSignature {
                found: file_header.signature,
            });
        }

        let mut info_bytes = [0u8; INFO_HEADER_LEN];
        reader
            .read_exact(&mut info_bytes)
            .map_err(|e| BmpError::from_read(e, "info header"))?;
        let info_header = InfoHeader::from(info_bytes);

        let info = ImageInfo::from_headers(&file_header, &info_header)?;

        let available = reader.seek(SeekFrom::End(0))?.saturating_sub(start);
        if file_header.file_size != 0 && file_header.file_size as u64 != available {
            warn!(
                "BMP declares file size {} but {available} bytes are available",
                file_header.file_size
            );
        }
        self.limits.check_dimensions(info.width, info.height)?;
        self.limits.check_file_size(available)?;
        self.limits.check_memory(info.buffer_bytes())?;

        if info.pixel_offset as u64 > available {
            return Err(BmpError::TruncatedData {
                context: "pixel offset",
            });
        }
        // Row data alone must fit in what the stream holds; reject before allocating.
        if info.buffer_bytes() > available.saturating_sub(info.pixel_offset as u64) {
            return Err(BmpError::TruncatedData {
                context: "pixel rows",
            });
        }
        let buffer_len =
            usize::try_from(info.buffer_bytes()).map_err(|_| BmpError::DimensionOverflow {
                width: info_header.width,
                height: info_header.height,
            })?;

        reader.seek(SeekFrom::Start(start + info.pixel_offset as u64))?;
        let pixels = read_rows(reader, &info, buffer_len, self.stop)?;

        debug!(
            "decoded {}x{} {}-bit BMP ({} padding bytes per row)",
            info.width,
            info.height,
            info.bits_per_pixel(),
            info.row_padding
        );
        Ok(BitmapImage::from_parts(file_header, info_header, info, pixels))
    }
}

/// Read `height` rows in stored (bottom-up) order, skipping row padding.
fn read_rows<R: Read + Seek>(
    reader: &mut R,
    info: &ImageInfo,
    buffer_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let mut pixels = vec![0u8; buffer_len];
    let row_bytes = info.row_bytes() as usize;
    if row_bytes == 0 {
        return Ok(pixels);
    }
    let padding = info.row_padding as i64;
    for row in pixels.chunks_exact_mut(row_bytes) {
        stop.check()?;
        reader
            .read_exact(row)
            .map_err(|e| BmpError::from_read(e, "pixel row"))?;
        if padding > 0 {
            reader.seek(SeekFrom::Current(padding))?;
        }
    }
    Ok(pixels)
}

/// Open and decode the BMP file at `path` with default settings.
pub fn decode_file(path: impl AsRef<Path>) -> Result<BitmapImage, BmpError> {
    Decoder::new().decode_path(path)
}
