// Square brush: its size and where its footprint lands around the pointer.

use crate::types::{Point, Rect};

pub const DEFAULT_BRUSH_SIZE: u32 = 15;
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Top-left corner of a `brush_size` square centred on `center`.
/// Even sizes put the extra pixel below/right of the pointer (floor bias).
/// Corners past the i32 range saturate; clamping to the canvas happens later anyway.
pub fn compute_top_left(center: Point, brush_size: u32) -> Point {
    let half = i64::from(brush_size / 2);
    let corner = |c: i32| (i64::from(c) - half).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Point::new(corner(center.x), corner(center.y))
}

/// One brush shared by both layers for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    size: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self { size: DEFAULT_BRUSH_SIZE }
    }
}

impl Brush {
    /// Sizes below the minimum are raised to it.
    pub fn new(size: u32) -> Self {
        Self { size: size.max(MIN_BRUSH_SIZE) }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Grow by one pixel and return the new size.
    pub fn increase(&mut self) -> u32 {
        self.size = self.size.saturating_add(1);
        self.size
    }

    /// Shrink by one pixel, never below 1, and return the new size.
    pub fn decrease(&mut self) -> u32 {
        self.size = self.size.saturating_sub(1).max(MIN_BRUSH_SIZE);
        self.size
    }

    pub fn reset(&mut self) -> u32 {
        self.size = DEFAULT_BRUSH_SIZE;
        self.size
    }

    /// The rect this brush covers when centred on `center`.
    pub fn footprint(&self, center: Point) -> Rect {
        Rect::square(compute_top_left(center, self.size), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_is_floor_biased() {
        assert_eq!(compute_top_left(Point::new(5, 5), 10), Point::new(0, 0));
        assert_eq!(compute_top_left(Point::new(5, 5), 15), Point::new(-2, -2));
        assert_eq!(compute_top_left(Point::new(5, 5), 1), Point::new(5, 5));
        assert_eq!(compute_top_left(Point::new(0, 0), 4), Point::new(-2, -2));
    }

    #[test]
    fn decrease_stops_at_one() {
        let mut brush = Brush::new(3);
        assert_eq!(brush.decrease(), 2);
        assert_eq!(brush.decrease(), 1);
        for _ in 0..5 {
            assert_eq!(brush.decrease(), 1);
        }
    }

    #[test]
    fn increase_and_reset() {
        let mut brush = Brush::default();
        assert_eq!(brush.size(), 15);
        assert_eq!(brush.increase(), 16);
        assert_eq!(brush.increase(), 17);
        assert_eq!(brush.reset(), 15);
    }

    #[test]
    fn zero_size_is_raised_to_minimum() {
        assert_eq!(Brush::new(0).size(), 1);
    }

    #[test]
    fn increase_saturates() {
        let mut brush = Brush::new(u32::MAX);
        assert_eq!(brush.increase(), u32::MAX);
    }

    #[test]
    fn huge_brush_past_the_edge_saturates() {
        let brush = Brush::new(u32::MAX);
        let r = brush.footprint(Point::new(-2, 0));
        assert_eq!(r, Rect::new(i32::MIN, -(i32::MAX), u32::MAX, u32::MAX));
        assert_eq!(r.clamp_to(4, 3), Some((0, 0, 4, 3)));
    }

    #[test]
    fn footprint_is_a_square_around_the_pointer() {
        let brush = Brush::new(10);
        assert_eq!(brush.footprint(Point::new(5, 5)), Rect::new(0, 0, 10, 10));
    }
}
