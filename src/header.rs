//! Fixed-layout BMP header records.
//!
//! Both headers are packed and unpacked field by field with explicit
//! little-endian conversions at fixed offsets. Every field is kept, so a
//! header read from a file is written back byte-for-byte.

/// `"BM"` read as a little-endian `u16`.
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// Size of [`FileHeader`] on disk.
pub const FILE_HEADER_LEN: usize = 14;

/// Size of [`InfoHeader`] on disk (`BITMAPINFOHEADER`).
pub const INFO_HEADER_LEN: usize = 40;

/// Offset of the pixel data when it directly follows both headers.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// `BI_RGB`: uncompressed pixel data.
pub const COMPRESSION_RGB: u32 = 0;

#[inline]
fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn i32_le(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// `BITMAPFILEHEADER`: the 14 bytes at the start of every BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FileHeader {
    /// Magic tag, [`BMP_SIGNATURE`] for a valid file.
    pub signature: u16,
    /// Total file size as declared by the writer.
    pub file_size: u32,
    /// Reserved, normally zero.
    pub reserved_1: u16,
    /// Reserved, normally zero.
    pub reserved_2: u16,
    /// Byte offset from the start of the file to the pixel data.
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Whether the signature is `BM`.
    pub fn has_valid_signature(&self) -> bool {
        self.signature == BMP_SIGNATURE
    }
}

impl From<[u8; FILE_HEADER_LEN]> for FileHeader {
    fn from(bytes: [u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: u16_le(&bytes, 0),
            file_size: u32_le(&bytes, 2),
            reserved_1: u16_le(&bytes, 6),
            reserved_2: u16_le(&bytes, 8),
            pixel_offset: u32_le(&bytes, 10),
        }
    }
}

impl From<FileHeader> for [u8; FILE_HEADER_LEN] {
    fn from(header: FileHeader) -> Self {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..2].copy_from_slice(&header.signature.to_le_bytes());
        out[2..6].copy_from_slice(&header.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&header.reserved_1.to_le_bytes());
        out[8..10].copy_from_slice(&header.reserved_2.to_le_bytes());
        out[10..14].copy_from_slice(&header.pixel_offset.to_le_bytes());
        out
    }
}

/// `BITMAPINFOHEADER`: the 40-byte core info header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InfoHeader {
    /// Size of this header; 40 for the variant this crate reads.
    pub header_size: u32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels. Positive means bottom-up row order.
    pub height: i32,
    /// Color planes, always 1.
    pub planes: u16,
    /// Bits per pixel.
    pub bits_per_pixel: u16,
    /// Compression method, [`COMPRESSION_RGB`] for raw pixels.
    pub compression: u32,
    /// Size of the pixel data in bytes, may be 0 for `BI_RGB`.
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub x_pixels_per_meter: i32,
    /// Vertical resolution in pixels per meter.
    pub y_pixels_per_meter: i32,
    /// Palette entries in use.
    pub colors_used: u32,
    /// Palette entries required for display.
    pub colors_important: u32,
}

impl From<[u8; INFO_HEADER_LEN]> for InfoHeader {
    fn from(bytes: [u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_le(&bytes, 0),
            width: i32_le(&bytes, 4),
            height: i32_le(&bytes, 8),
            planes: u16_le(&bytes, 12),
            bits_per_pixel: u16_le(&bytes, 14),
            compression: u32_le(&bytes, 16),
            image_size: u32_le(&bytes, 20),
            x_pixels_per_meter: i32_le(&bytes, 24),
            y_pixels_per_meter: i32_le(&bytes, 28),
            colors_used: u32_le(&bytes, 32),
            colors_important: u32_le(&bytes, 36),
        }
    }
}

impl From<InfoHeader> for [u8; INFO_HEADER_LEN] {
    fn from(header: InfoHeader) -> Self {
        let mut out = [0u8; INFO_HEADER_LEN];
        out[0..4].copy_from_slice(&header.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&header.width.to_le_bytes());
        out[8..12].copy_from_slice(&header.height.to_le_bytes());
        out[12..14].copy_from_slice(&header.planes.to_le_bytes());
        out[14..16].copy_from_slice(&header.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&header.compression.to_le_bytes());
        out[20..24].copy_from_slice(&header.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&header.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&header.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&header.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&header.colors_important.to_le_bytes());
        out
    }
}
