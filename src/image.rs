//! Decoded bitmap store: headers plus the owned pixel buffer.

use std::io::{Read, Seek, Write};
use std::path::Path;

use rgb::RGB8;

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::BmpError;
use crate::header::{FileHeader, InfoHeader};
use crate::info::ImageInfo;
use crate::pixel::PixelLayout;
use crate::preview::{Preview, PreviewGlyphs};
use crate::raster::{self, Canvas};

/// A decoded 24- or 32-bit BMP image.
///
/// Holds both headers exactly as read, so encoding writes them back
/// unchanged, and a pixel buffer of `width × height × bytes_per_pixel`
/// bytes in BGR(A) order with the visual bottom row first.
///
/// Pixel coordinates in the public API are visual: `(0, 0)` is the
/// top-left corner. Two bounds policies apply:
///
/// - writes ([`set_pixel`](Self::set_pixel), drawing) outside the image are
///   silently clipped;
/// - reads ([`get_pixel`](Self::get_pixel)) outside the image fail with
///   [`BmpError::OutOfBounds`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapImage {
    file_header: FileHeader,
    info_header: InfoHeader,
    info: ImageInfo,
    pixels: Vec<u8>,
}

impl BitmapImage {
    /// Assemble an image from validated headers and a full pixel buffer.
    pub(crate) fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        info: ImageInfo,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(pixels.len() as u64, info.buffer_bytes());
        Self {
            file_header,
            info_header,
            info,
            pixels,
        }
    }

    /// Decode an in-memory BMP file with default settings.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        Decoder::new().decode_bytes(data)
    }

    /// Decode from a seekable reader with default settings.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self, BmpError> {
        Decoder::new().decode(reader)
    }

    /// Open and decode a BMP file with default settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        Decoder::new().decode_path(path)
    }

    /// Encode to a new byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BmpError> {
        Encoder::new().encode_to_vec(self)
    }

    /// Encode into a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BmpError> {
        Encoder::new().encode(self, writer)
    }

    /// Encode and write to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        Encoder::new().encode_path(self, path)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.info.width as usize
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.info.height as usize
    }

    /// Stored pixel layout.
    pub fn layout(&self) -> PixelLayout {
        self.info.layout
    }

    /// Bits per pixel (24 or 32).
    pub fn bits_per_pixel(&self) -> u16 {
        self.info.bits_per_pixel()
    }

    /// Bytes per pixel (3 or 4).
    pub fn bytes_per_pixel(&self) -> usize {
        self.info.bytes_per_pixel()
    }

    /// Padding bytes written after each row on encode.
    pub fn row_padding(&self) -> usize {
        self.info.row_padding
    }

    /// Header-derived metadata.
    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    /// File header as read from the source.
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// Info header as read from the source.
    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Raw pixel bytes, BGR(A), bottom row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One stored row, `stored_y == 0` being the visual bottom row.
    pub(crate) fn stored_row(&self, stored_y: usize) -> &[u8] {
        let row_bytes = self.width() * self.bytes_per_pixel();
        let start = stored_y * row_bytes;
        &self.pixels[start..start + row_bytes]
    }

    /// Buffer offset of visual pixel `(x, y)`, or `None` when outside the image.
    ///
    /// This is the only place the row flip and the BGR(A) stride live.
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let stored_y = self.height() - 1 - y;
        Some((stored_y * self.width() + x) * self.bytes_per_pixel())
    }

    /// Color at visual `(x, y)`.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<RGB8, BmpError> {
        let at = self.offset(x, y).ok_or(BmpError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })?;
        let bgr = &self.pixels[at..at + 3];
        Ok(RGB8::new(bgr[2], bgr[1], bgr[0]))
    }

    /// Alpha byte at visual `(x, y)`, `None` for 24-bit images.
    pub fn get_alpha(&self, x: i32, y: i32) -> Result<Option<u8>, BmpError> {
        let at = self.offset(x, y).ok_or(BmpError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })?;
        Ok(self.layout().has_alpha().then(|| self.pixels[at + 3]))
    }

    /// Set the color at visual `(x, y)`.
    ///
    /// Coordinates outside the image are ignored. The alpha byte of a
    /// 32-bit pixel is left untouched.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: RGB8) {
        let Some(at) = self.offset(x, y) else {
            return;
        };
        self.pixels[at] = color.b;
        self.pixels[at + 1] = color.g;
        self.pixels[at + 2] = color.r;
    }

    /// Draw a Bresenham line from `(x1, y1)` to `(x2, y2)`, clipping at the edges.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: RGB8) {
        raster::draw_line(self, (x1, y1), (x2, y2), color);
    }

    /// Draw both corner-to-corner diagonals.
    pub fn draw_diagonals(&mut self, color: RGB8) {
        let right = self.width() as i32 - 1;
        let bottom = self.height() as i32 - 1;
        self.draw_line(0, bottom, right, 0, color);
        self.draw_line(0, 0, right, bottom, color);
    }

    /// Text preview with the default glyphs, visual top row first.
    pub fn preview(&self) -> Preview<'_> {
        Preview::new(self, PreviewGlyphs::default())
    }

    /// Text preview with custom glyphs.
    pub fn preview_with(&self, glyphs: PreviewGlyphs) -> Preview<'_> {
        Preview::new(self, glyphs)
    }
}

impl Canvas for BitmapImage {
    fn plot(&mut self, x: i32, y: i32, color: RGB8) {
        self.set_pixel(x, y, color);
    }
}
