//! Idle/demo mode - AI steers the ball
//!
//! Dodges the lowest obstacle that threatens the ball's column and, when
//! nothing threatens, lines up under the lowest bonus. Produces drag input so
//! it drives the game exactly like a player would.

use super::control::DragPhase;
use super::state::{Ball, EntityKind, FallingEntity};
use super::tick::{Game, GameInput};

/// Horizontal breathing room kept around dodged obstacles
const DODGE_MARGIN: f32 = 4.0;

/// Target ball x for the current frame, or None to stay put
pub fn steer(game: &Game) -> Option<f32> {
    if !game.state().is_playing() {
        return None;
    }
    let ball = game.ball();
    let max_x = ball.max_x(game.field_size().0);
    pick_target(ball, game.entities(), max_x)
}

fn pick_target(ball: &Ball, entities: &[FallingEntity], max_x: f32) -> Option<f32> {
    let ball_bottom = ball.y + ball.height;
    let incoming = |kind: EntityKind| {
        entities
            .iter()
            .filter(move |e| e.is_falling() && e.kind == kind && e.y < ball_bottom)
    };

    let threat = lowest(
        incoming(EntityKind::Obstacle).filter(|e| spans_overlap(ball.x, ball.width, e.x, e.size)),
    );

    if let Some(threat) = threat {
        let left = threat.x - ball.width - DODGE_MARGIN;
        let right = threat.x + threat.size + DODGE_MARGIN;
        // Shortest escape that stays on the field; otherwise hug the far wall
        let escape = [left, right]
            .into_iter()
            .filter(|x| (0.0..=max_x).contains(x))
            .min_by(|a, b| {
                (a - ball.x)
                    .abs()
                    .partial_cmp(&(b - ball.x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let far_wall = if threat.x + threat.size / 2.0 > max_x / 2.0 {
            0.0
        } else {
            max_x
        };
        return Some(escape.unwrap_or(far_wall));
    }

    lowest(incoming(EntityKind::Bonus))
        .map(|bonus| (bonus.x + (bonus.size - ball.width) / 2.0).clamp(0.0, max_x))
}

/// Entity whose bottom edge is closest to the floor
fn lowest<'a>(entities: impl Iterator<Item = &'a FallingEntity>) -> Option<&'a FallingEntity> {
    entities.max_by(|a, b| {
        (a.y + a.size)
            .partial_cmp(&(b.y + b.size))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[inline]
fn spans_overlap(x1: f32, w1: f32, x2: f32, w2: f32) -> bool {
    x1 < x2 + w2 && x1 + w1 > x2
}

/// Drag gesture that moves the ball from `from_x` to `to_x`
pub fn drag_inputs(from_x: f32, to_x: f32) -> [GameInput; 2] {
    [
        GameInput::Drag {
            phase: DragPhase::Start,
            x: from_x,
        },
        GameInput::Drag {
            phase: DragPhase::Move,
            x: to_x,
        },
    ]
}
