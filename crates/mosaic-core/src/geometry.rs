//! Screen-space geometry.
//!
//! Rectangles are in CSS pixels, as reported by `getBoundingClientRect`.

use glam::DVec2;

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle with position and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Top-left corner as a vector.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }

    /// Get the right edge (left + width).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Get the bottom edge (top + height).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midpoint.
    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Check if a point is inside the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// True when the rectangle has no usable width (unmounted or hidden).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.width > 0.0)
    }

    /// Offset that moves this rectangle's origin back to `previous`'s origin.
    pub fn offset_from(&self, previous: &Rect) -> DVec2 {
        previous.origin() - self.origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_midpoint() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!((r.right() - 110.0).abs() < 1e-9);
        assert!((r.bottom() - 70.0).abs() < 1e-9);
        assert!((r.mid_y() - 45.0).abs() < 1e-9);
        assert!(r.contains(50.0, 45.0));
        assert!(!r.contains(5.0, 45.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rect::default().is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 0.0).is_degenerate());
    }

    #[test]
    fn test_offset_from() {
        let old = Rect::new(0.0, 100.0, 50.0, 50.0);
        let new = Rect::new(60.0, 20.0, 50.0, 50.0);
        let d = new.offset_from(&old);
        assert!((d.x + 60.0).abs() < 1e-9);
        assert!((d.y - 80.0).abs() < 1e-9);
    }
}
