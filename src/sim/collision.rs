//! Axis-aligned collision detection
//!
//! The dino is tested as a single point (its bounding-box center) against the
//! obstacle's rectangle advanced one frame of its own motion. Checking one
//! step ahead keeps fast obstacles from tunneling past the test between
//! frames; the point test is deliberately permissive so near misses feel fair.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Dino, Obstacle};

/// Axis-aligned rectangle (min corner plus size, y growing downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Point containment, inclusive of all edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max().x && p.y >= self.min.y && p.y <= self.max().y
    }

    /// The same rectangle shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }
}

/// True when the dino's bounding-box center sits inside the obstacle's
/// predicted next-frame rectangle.
pub fn check_collision(dino: &Dino, obstacle: &Obstacle) -> bool {
    obstacle.predicted_rect().contains(dino.rect().center())
}
