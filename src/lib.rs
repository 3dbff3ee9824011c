//! Uncompressed BMP codec with a text preview and a line rasterizer.
//!
//! This crate reads and writes 24-bit (BGR) and 32-bit (BGRA) Windows
//! bitmaps that use the 40-byte `BITMAPINFOHEADER`, bottom-up row order and
//! no compression. Everything else is rejected with a specific [`BmpError`].
//!
//! - [`BitmapImage`] — decoded headers plus the owned pixel buffer
//! - [`Decoder`] / [`Encoder`] — per-operation settings (limits, stop token)
//! - [`probe`] — header-only validation returning [`ImageInfo`]
//! - [`Preview`] — three-glyph text rendering, top row first
//! - [`LinePoints`] / [`draw_line`] — Bresenham rasterization onto a [`Canvas`]
//!
//! Headers are kept verbatim, so an image that is decoded and re-encoded
//! without changes comes back byte-identical, except that any non-zero row
//! padding bytes are written as zero.
//!
//! ```
//! use zenbmp::{BitmapImage, RGB8};
//!
//! # fn bmp_4x2() -> Vec<u8> {
//! #     let mut v = Vec::new();
//! #     v.extend_from_slice(b"BM");
//! #     v.extend_from_slice(&78u32.to_le_bytes());
//! #     v.extend_from_slice(&[0; 4]);
//! #     v.extend_from_slice(&54u32.to_le_bytes());
//! #     v.extend_from_slice(&40u32.to_le_bytes());
//! #     v.extend_from_slice(&4i32.to_le_bytes());
//! #     v.extend_from_slice(&2i32.to_le_bytes());
//! #     v.extend_from_slice(&1u16.to_le_bytes());
//! #     v.extend_from_slice(&24u16.to_le_bytes());
//! #     v.extend_from_slice(&[0; 24]);
//! #     v.extend_from_slice(&[0; 24]);
//! #     v
//! # }
//! let mut image = BitmapImage::from_bytes(&bmp_4x2())?;
//! assert_eq!(image.preview().collect::<Vec<_>>(), ["    ", "    "]);
//!
//! image.draw_diagonals(RGB8::new(255, 255, 255));
//! let bytes = image.to_bytes()?;
//! assert_eq!(BitmapImage::from_bytes(&bytes)?.pixels(), image.pixels());
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod pixel;
mod preview;
mod raster;

pub use decode::{Decoder, decode_file};
pub use encode::{Encoder, encode_file};
pub use error::BmpError;
pub use header::{
    BMP_SIGNATURE, COMPRESSION_RGB, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader,
    PIXEL_DATA_OFFSET,
};
pub use image::BitmapImage;
pub use info::{ImageInfo, probe};
pub use limits::{LimitExceeded, Limits};
pub use pixel::PixelLayout;
pub use preview::{Preview, PreviewGlyphs};
pub use raster::{Canvas, LinePoints, draw_line};

// Re-exports for callers.
pub use enough::{Stop, StopReason, Unstoppable};
pub use rgb::RGB8;
