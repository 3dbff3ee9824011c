//! Error type for BMP decode, encode and pixel access.

use std::io;

use enough::StopReason;
use thiserror::Error;

use crate::limits::LimitExceeded;

/// Everything that can go wrong while decoding, encoding or reading pixels.
///
/// Each variant is a hard failure for the current operation. Out-of-bounds
/// pixel *writes* are not represented here: they are silently clipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BmpError {
    /// The first two bytes are not `BM`.
    #[error("not a BMP file: signature {found:#06x}, expected 0x4d42 (\"BM\")")]
    BadSignature {
        /// Signature read from the file header, little-endian.
        found: u16,
    },

    /// Info header is not the 40-byte `BITMAPINFOHEADER`.
    #[error("unsupported BMP header variant: info header size {size}, expected 40")]
    UnsupportedHeaderVariant {
        /// Declared info header size.
        size: u32,
    },

    /// Color plane count is not 1.
    #[error("unsupported BMP plane count {planes}, expected 1")]
    UnsupportedPlaneCount {
        /// Declared plane count.
        planes: u16,
    },

    /// Bits per pixel other than 24 or 32.
    #[error("unsupported bit depth {bits}, only 24 and 32 bits per pixel are supported")]
    UnsupportedBitDepth {
        /// Declared bits per pixel.
        bits: u16,
    },

    /// Height is zero or negative (top-down row order).
    #[error("unsupported orientation: height {height} (top-down and empty images are rejected)")]
    UnsupportedOrientation {
        /// Declared height.
        height: i32,
    },

    /// Compression method is not `BI_RGB`.
    #[error("unsupported compression method {method}, only uncompressed BI_RGB (0) is supported")]
    UnsupportedCompression {
        /// Declared compression method.
        method: u32,
    },

    /// The stream ended before a header or a pixel row was complete.
    #[error("truncated BMP data: {context}")]
    TruncatedData {
        /// What was being read when the data ran out.
        context: &'static str,
    },

    /// Width × height × bytes-per-pixel does not fit in memory addressing.
    #[error("image dimensions {width}x{height} overflow the pixel buffer size")]
    DimensionOverflow {
        /// Declared width.
        width: i32,
        /// Declared height.
        height: i32,
    },

    /// Pixel read outside `[0, width) × [0, height)`.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row (visual, top-down).
        y: i32,
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },

    /// A configured [`Limits`](crate::Limits) bound was exceeded.
    #[error(transparent)]
    LimitExceeded(#[from] LimitExceeded),

    /// The stop token asked the operation to end early.
    #[error("operation stopped: {0:?}")]
    Stopped(StopReason),

    /// Open, create, read or write failure from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<StopReason> for BmpError {
    fn from(reason: StopReason) -> Self {
        Self::Stopped(reason)
    }
}

impl BmpError {
    /// Map a read failure, turning `UnexpectedEof` into [`BmpError::TruncatedData`].
    pub(crate) fn from_read(err: io::Error, context: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::TruncatedData { context }
        } else {
            Self::Io(err)
        }
    }
}
