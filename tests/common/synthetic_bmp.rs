#![allow(dead_code)]

/// Builds a BMP file byte by byte, independent of the crate's own header code.
pub struct BmpBuilder {
    pub signature: [u8; 2],
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub gap: usize,
    pub pad_byte: u8,
}

impl BmpBuilder {
    pub fn new(width: i32, height: i32, bits_per_pixel: u16) -> Self {
        Self {
            signature: *b"BM",
            header_size: 40,
            width,
            height,
            planes: 1,
            bits_per_pixel,
            compression: 0,
            gap: 0,
            pad_byte: 0,
        }
    }

    pub fn row_padding(&self) -> usize {
        if self.bits_per_pixel == 24 {
            (4 - (self.width.max(0) as usize * 3) % 4) % 4
        } else {
            0
        }
    }

    /// Serialize with `pixel(x, stored_y)` giving each stored pixel's bytes.
    pub fn build_with(&self, pixel: impl Fn(usize, usize) -> Vec<u8>) -> Vec<u8> {
        let width = self.width.max(0) as usize;
        let rows = self.height.unsigned_abs() as usize;
        let mut body = Vec::new();
        for y in 0..rows {
            for x in 0..width {
                body.extend(pixel(x, y));
            }
            body.extend(std::iter::repeat_n(self.pad_byte, self.row_padding()));
        }

        let offset = 54 + self.gap;
        let mut out = Vec::with_capacity(offset + body.len());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&((offset + body.len()) as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend(std::iter::repeat_n(0u8, self.gap));
        out.extend_from_slice(&body);
        out
    }

    /// Every pixel the same BGR(A) value.
    pub fn build_solid(&self, bgra: [u8; 4]) -> Vec<u8> {
        let bpp = (self.bits_per_pixel / 8) as usize;
        self.build_with(|_, _| bgra[..bpp].to_vec())
    }

    /// Pseudo-random but deterministic pixel bytes.
    pub fn build_noise(&self, seed: u32) -> Vec<u8> {
        let bpp = (self.bits_per_pixel / 8) as usize;
        let width = self.width.max(0) as usize;
        self.build_with(|x, y| {
            (0..bpp)
                .map(|c| {
                    let v = seed
                        .wrapping_add((y * width + x) as u32)
                        .wrapping_mul(2_654_435_761)
                        .wrapping_add(c as u32 * 97);
                    (v >> 13) as u8
                })
                .collect()
        })
    }
}
