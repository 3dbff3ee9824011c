//! Coarse text rendering of an image.
//!
//! Every pixel maps to one of three glyphs: pure black, pure white, or
//! anything else. There is deliberately no grayscale ramp.

use core::fmt;
use core::iter::FusedIterator;

use rgb::RGB8;

use crate::image::BitmapImage;

/// Characters used by [`Preview`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreviewGlyphs {
    /// Pure black, `(0, 0, 0)`.
    pub dark: char,
    /// Pure white, `(255, 255, 255)`.
    pub bright: char,
    /// Every other color.
    pub filled: char,
}

impl Default for PreviewGlyphs {
    fn default() -> Self {
        Self {
            dark: ' ',
            bright: '@',
            filled: 'X',
        }
    }
}

impl PreviewGlyphs {
    /// Glyph for one color.
    pub fn glyph(&self, color: RGB8) -> char {
        match (color.r, color.g, color.b) {
            (0, 0, 0) => self.dark,
            (255, 255, 255) => self.bright,
            _ => self.filled,
        }
    }
}

/// Lazy iterator over preview lines, visual top row first.
///
/// Cloning or calling [`BitmapImage::preview`] again restarts from the top;
/// the output only depends on the current pixel buffer.
#[derive(Clone, Debug)]
pub struct Preview<'a> {
    image: &'a BitmapImage,
    glyphs: PreviewGlyphs,
    // Stored rows not yet yielded are 0..remaining; the next one is remaining - 1.
    remaining: usize,
}

impl<'a> Preview<'a> {
    pub(crate) fn new(image: &'a BitmapImage, glyphs: PreviewGlyphs) -> Self {
        Self {
            image,
            glyphs,
            remaining: image.height(),
        }
    }

    fn render_row(&self, stored_y: usize) -> String {
        self.image
            .stored_row(stored_y)
            .chunks_exact(self.image.bytes_per_pixel())
            .map(|px| self.glyphs.glyph(RGB8::new(px[2], px[1], px[0])))
            .collect()
    }
}

impl Iterator for Preview<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.render_row(self.remaining))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Preview<'_> {}

impl FusedIterator for Preview<'_> {}

/// Writes every remaining line followed by `\n`.
impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.clone() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
