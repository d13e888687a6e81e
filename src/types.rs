// Core types shared by the surfaces, the brush and the stroke history.

use std::fmt::{self, Display};

/// A cleared pixel. Pixels are packed as 0xAARRGGBB; alpha 0 means "nothing here".
pub const TRANSPARENT: u32 = 0x0000_0000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // buffer width in pixels
    pub height: usize,    // buffer height in pixels
    pub pixels: Vec<u32>, // each entry is 0xAARRGGBB, row-major
}

impl FrameBuffer {
    /// A fully transparent buffer (what the mask layer starts as).
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Pixel at (x,y), or None when the coordinate is off the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// One of the two editable buffers pixels move between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    #[default]
    Image,
    Mask,
}

impl Layer {
    /// The buffer on the opposite side of a transfer.
    pub fn other(self) -> Layer {
        match self {
            Layer::Image => Layer::Mask,
            Layer::Mask => Layer::Image,
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Image => f.write_str("image"),
            Layer::Mask => f.write_str("mask"),
        }
    }
}

/// Buffer-space coordinate. May sit off the canvas while the pointer overhangs an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `side` anchored at `top_left`.
    pub fn square(top_left: Point, side: u32) -> Self {
        Self::new(top_left.x, top_left.y, side, side)
    }

    /// Intersect with a `width` x `height` buffer.
    /// Returns the half-open span (x0, y0, x1, y1), or None when nothing overlaps.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        // i64 so x + width can't overflow near i32::MAX
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(width as i64);
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let ax1 = i64::from(self.x) + i64::from(self.width);
        let ay1 = i64::from(self.y) + i64::from(self.height);
        let bx1 = i64::from(other.x) + i64::from(other.width);
        let by1 = i64::from(other.y) + i64::from(other.height);
        i64::from(self.x) < bx1
            && i64::from(other.x) < ax1
            && i64::from(self.y) < by1
            && i64::from(other.y) < ay1
    }
}
