//! Movement constraints: interior bounds and obstacle blocking
//!
//! Walls and terrain block movement identically; the distinction only matters
//! to renderers.

use glam::DVec2;

use super::rect::Rect;
use crate::settings::Settings;

/// The playable region inside the boundary walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interior {
    pub min: DVec2,
    pub max: DVec2,
}

impl Interior {
    pub fn new(width: f64, height: f64, border: f64) -> Self {
        Self {
            min: DVec2::splat(border),
            max: DVec2::new(width - border, height - border),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.arena_width as f64,
            settings.arena_height as f64,
            settings.border as f64,
        )
    }

    /// Clamp the top-left corner of a `size`-sided box so the box stays inside.
    ///
    /// The low bound is applied before the high bound on each axis.
    pub fn clamp(&self, pos: DVec2, size: f64) -> DVec2 {
        let mut p = pos;
        if p.x < self.min.x {
            p.x = self.min.x;
        }
        if p.x + size > self.max.x {
            p.x = self.max.x - size;
        }
        if p.y < self.min.y {
            p.y = self.min.y;
        }
        if p.y + size > self.max.y {
            p.y = self.max.y - size;
        }
        p
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= self.min.x
            && rect.y >= self.min.y
            && rect.right() <= self.max.x
            && rect.bottom() <= self.max.y
    }
}

/// True if `rect` overlaps any of `obstacles`
#[inline]
pub fn blocked_by_any(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|o| o.intersects(rect))
}

/// True if `rect` overlaps any wall or terrain patch
#[inline]
pub fn blocked_by_obstacles(rect: &Rect, walls: &[Rect], terrains: &[Rect]) -> bool {
    blocked_by_any(rect, walls) || blocked_by_any(rect, terrains)
}
