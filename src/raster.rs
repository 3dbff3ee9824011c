//! Integer line rasterization.
//!
//! [`LinePoints`] walks the classic Bresenham error accumulator and yields
//! the 8-connected points of a segment, both endpoints included, exactly
//! `max(|dx|, |dy|) + 1` of them. [`draw_line`] plots those points onto any
//! [`Canvas`]. Clipping is the canvas's job: the rasterizer never looks at
//! image bounds.

use log::trace;
use rgb::RGB8;

/// A surface that accepts individual pixel writes.
///
/// Implementations decide what happens outside their bounds;
/// [`BitmapImage`](crate::BitmapImage) ignores such writes.
pub trait Canvas {
    /// Write one pixel.
    fn plot(&mut self, x: i32, y: i32, color: RGB8);
}

/// Iterator over the points of a Bresenham line.
#[derive(Clone, Debug)]
pub struct LinePoints {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePoints {
    /// Points from `start` to `end`, both inclusive.
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        let (x1, y1) = (start.0 as i64, start.1 as i64);
        let (x2, y2) = (end.0 as i64, end.1 as i64);
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        Self {
            x: x1,
            y: y1,
            end_x: x2,
            end_y: y2,
            dx,
            dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // Coordinates never leave the [start, end] box, so they fit in i32.
        let point = (self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let distance = (self.end_x - self.x).abs().max((self.end_y - self.y).abs());
        let remaining = usize::try_from(distance).map_or(usize::MAX, |d| d.saturating_add(1));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinePoints {}

impl core::iter::FusedIterator for LinePoints {}

/// Plot a line from `start` to `end` onto `canvas`.
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    start: (i32, i32),
    end: (i32, i32),
    color: RGB8,
) {
    trace!("line {start:?} -> {end:?} in {color:?}");
    for (x, y) in LinePoints::new(start, end) {
        canvas.plot(x, y, color);
    }
}
