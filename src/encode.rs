//! BMP encoding.
//!
//! Output is the two headers exactly as they were read, then the pixel rows
//! in stored order, each followed by zero padding up to a 4-byte boundary.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};
use log::debug;

use crate::error::BmpError;
use crate::header::{FILE_HEADER_LEN, INFO_HEADER_LEN, PIXEL_DATA_OFFSET};
use crate::image::BitmapImage;

/// Encode settings.
#[derive(Clone, Copy)]
pub struct Encoder<'a> {
    stop: &'a dyn Stop,
}

impl Default for Encoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Encoder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Encoder").finish_non_exhaustive()
    }
}

impl<'a> Encoder<'a> {
    /// Encoder that never stops early.
    pub fn new() -> Self {
        Self { stop: &Unstoppable }
    }

    /// Set a cooperative cancellation token, checked once per pixel row.
    pub fn with_stop(mut self, stop: &'a dyn Stop) -> Self {
        self.stop = stop;
        self
    }

    /// Encode into a new byte vector.
    pub fn encode_to_vec(&self, image: &BitmapImage) -> Result<Vec<u8>, BmpError> {
        let mut out = Vec::with_capacity(encoded_len(image));
        self.encode(image, &mut out)?;
        Ok(out)
    }

    /// Create (or truncate) `path` and write the encoded image to it.
    pub fn encode_path(&self, image: &BitmapImage, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode(image, &mut writer)?;
        writer.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Write the encoded image to `writer`.
    pub fn encode<W: Write>(&self, image: &BitmapImage, writer: &mut W) -> Result<(), BmpError> {
        writer.write_all(&<[u8; FILE_HEADER_LEN]>::from(*image.file_header()))?;
        writer.write_all(&<[u8; INFO_HEADER_LEN]>::from(*image.info_header()))?;

        // Keep the declared pixel offset truthful when the source had a gap.
        let gap = header_gap(image);
        if gap > 0 {
            io::copy(&mut io::repeat(0).take(gap as u64), writer)?;
        }

        let padding = [0u8; 3];
        let pad = &padding[..image.row_padding()];
        for stored_y in 0..image.height() {
            self.stop.check()?;
            writer.write_all(image.stored_row(stored_y))?;
            writer.write_all(pad)?;
        }

        debug!(
            "encoded {}x{} {}-bit BMP",
            image.width(),
            image.height(),
            image.bits_per_pixel()
        );
        Ok(())
    }
}

/// Zero bytes between the end of the headers and the declared pixel offset.
fn header_gap(image: &BitmapImage) -> usize {
    (image.file_header().pixel_offset as usize).saturating_sub(PIXEL_DATA_OFFSET)
}

/// Exact size of the encoded output.
fn encoded_len(image: &BitmapImage) -> usize {
    let row = image.width() * image.bytes_per_pixel() + image.row_padding();
    PIXEL_DATA_OFFSET + header_gap(image) + row * image.height()
}

/// Encode `image` and write it to `path` with default settings.
pub fn encode_file(image: &BitmapImage, path: impl AsRef<Path>) -> Result<(), BmpError> {
    Encoder::new().encode_path(image, path)
}
