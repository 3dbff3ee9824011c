//! Pixel layouts a BMP file can store.

/// Byte layout of one stored pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelLayout {
    /// Blue, green, red (24 bits per pixel).
    Bgr8 = 3,
    /// Blue, green, red, alpha (32 bits per pixel, Windows byte order).
    Bgra8 = 4,
}

impl PixelLayout {
    /// Layout for a declared bit depth, `None` for anything but 24 and 32.
    pub const fn from_bits_per_pixel(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr8),
            32 => Some(Self::Bgra8),
            _ => None,
        }
    }

    /// Bytes per pixel (3 or 4).
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    /// Bits per pixel (24 or 32).
    #[inline]
    pub const fn bits_per_pixel(self) -> u16 {
        self as u16 * 8
    }

    /// Whether the fourth byte is an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Bgra8)
    }

    /// Zero bytes appended to each stored row to reach a 4-byte boundary.
    ///
    /// 32-bit rows are always aligned, so this is nonzero only for 24-bit.
    #[inline]
    pub const fn row_padding(self, width: usize) -> usize {
        match self {
            Self::Bgr8 => (4 - (width * 3) % 4) % 4,
            Self::Bgra8 => 0,
        }
    }
}
