//! Horizontal drag control for the ball

use serde::{Deserialize, Serialize};

/// Phase of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Start,
    Move,
}

/// Anchor recorded at gesture start
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    ball_x: f32,
    gesture_x: f32,
}

/// Tracks one active drag gesture
#[derive(Debug, Clone, Default)]
pub struct BallController {
    anchor: Option<DragAnchor>,
}

impl BallController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Record where the ball and the finger were when the gesture began
    pub fn begin(&mut self, ball_x: f32, gesture_x: f32) {
        self.anchor = Some(DragAnchor { ball_x, gesture_x });
    }

    /// New ball x for a gesture move, clamped to `[0, max_x]`.
    /// Returns None when no gesture is active.
    pub fn drag_to(&self, gesture_x: f32, max_x: f32) -> Option<f32> {
        let anchor = self.anchor?;
        let proposed = anchor.ball_x + (gesture_x - anchor.gesture_x);
        Some(proposed.clamp(0.0, max_x.max(0.0)))
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }
}
