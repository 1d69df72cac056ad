//! Collision detection between the ball and falling entities
//!
//! Everything on the field is an axis-aligned rectangle, so a single strict
//! overlap test covers every pair. Touching edges do not count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, FallingEntity};

/// Axis-aligned rectangle (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Strict AABB overlap: `l1 < r2 && r1 > l2 && t1 < b2 && b1 > t2`
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Check a falling entity against the ball at their current positions
pub fn ball_entity_collision(ball: &Ball, entity: &FallingEntity) -> bool {
    overlaps(&ball.rect(), &entity.rect())
}
