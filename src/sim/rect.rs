//! Axis-aligned rectangle geometry
//!
//! Every obstacle, entity footprint and buffer zone is a [`Rect`] in arena
//! pixel coordinates, y growing downwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square box of side `size` at `pos`
    pub fn square(pos: DVec2, size: f64) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow by `margin` on every side
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Half-open overlap test; shared edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Free-function form of [`Rect::intersects`]
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let right = Rect::new(30.0, 0.0, 30.0, 30.0);
        let below = Rect::new(0.0, 30.0, 30.0, 30.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps on x but not on y
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn test_expand() {
        let r = Rect::new(100.0, 100.0, 20.0, 20.0).expand(50.0);
        assert_eq!(r, Rect::new(50.0, 50.0, 120.0, 120.0));
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -500.0..500.0f64, ay in -500.0..500.0f64,
            aw in 0.5..200.0f64, ah in 0.5..200.0f64,
            bx in -500.0..500.0f64, by in -500.0..500.0f64,
            bw in 0.5..200.0f64, bh in 0.5..200.0f64,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_overlaps_itself(
            x in -500.0..500.0f64, y in -500.0..500.0f64,
            w in 0.5..200.0f64, h in 0.5..200.0f64,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.intersects(&r));
        }
    }
}
