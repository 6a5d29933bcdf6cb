//! Signed 2D points and half-open rectangles used for sheet bounds.

use serde::{Deserialize, Serialize};

/// A point on the cell grid. Coordinates may be negative.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Point {
        Point { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A half-open rectangle `[min.x, max.x) x [min.y, max.y)`.
///
/// Rectangles with `min.x >= max.x` or `min.y >= max.y` are empty and contain
/// no point.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Create a rectangle from two corner coordinates.
    ///
    /// The corners are canonicalized per axis, so `new(x1, y1, x0, y0)`
    /// describes the same rectangle as `new(x0, y0, x1, y1)`.
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Rect {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Rect {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Width in columns. Zero or positive for canonical rectangles.
    pub const fn width(&self) -> i64 {
        self.max.x - self.min.x
    }

    /// Height in rows. Zero or positive for canonical rectangles.
    pub const fn height(&self) -> i64 {
        self.max.y - self.min.y
    }

    /// True if the rectangle contains no point.
    pub const fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// True if `(x, y)` lies inside the rectangle.
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.min.x, self.max.x, self.min.y, self.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canonicalizes_corners() {
        assert_eq!(Rect::new(33, 34, -31, -32), Rect::new(-31, -32, 33, 34));
    }

    #[test]
    fn test_dimensions() {
        let r = Rect::new(-31, -32, 33, 34);
        assert_eq!(r.width(), 64);
        assert_eq!(r.height(), 66);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_zero_rect_is_empty() {
        assert!(Rect::ZERO.is_empty());
        assert_eq!(Rect::ZERO.width(), 0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(-2, -2, 3, 3);
        assert!(r.contains(-2, -2));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(2, 3));
        assert!(!r.contains(-3, 0));
    }

    #[test]
    fn test_point_add() {
        assert_eq!(Point::new(1, -2) + Point::new(3, 5), Point::new(4, 3));
    }
}
