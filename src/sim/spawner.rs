//! Entity spawning and the difficulty curve
//!
//! All rolls are pure functions of the tuning, current progression, field
//! geometry and a caller-supplied RNG, so they can be tested without a clock.

use rand::Rng;

use super::state::EntityKind;
use crate::tuning::{Difficulty, Tuning};

/// Everything a spawn tick decides about a new entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub kind: EntityKind,
    pub size: f32,
    pub x: f32,
    pub fall_duration_ms: u64,
}

/// Fall duration for the current progress, never below the curve's floor
pub fn fall_duration_ms(difficulty: &Difficulty, level: u32, score: u32) -> u64 {
    match *difficulty {
        Difficulty::PerLevel {
            base_ms,
            step_ms,
            min_ms,
        } => {
            let steps = u64::from(level.saturating_sub(1));
            base_ms.saturating_sub(steps.saturating_mul(step_ms)).max(min_ms)
        }
        Difficulty::PerPoint {
            base_ms,
            step_ms,
            min_ms,
        } => base_ms
            .saturating_sub(u64::from(score).saturating_mul(step_ms))
            .max(min_ms),
    }
}

/// Weighted coin flip between Bonus and Obstacle
pub fn roll_kind<R: Rng>(rng: &mut R, bonus_chance: f64) -> EntityKind {
    if bonus_chance > 0.0 && rng.random_bool(bonus_chance.min(1.0)) {
        EntityKind::Bonus
    } else {
        EntityKind::Obstacle
    }
}

/// Obstacles are uniform in [min, max]; bonuses have a fixed size
pub fn roll_size<R: Rng>(rng: &mut R, kind: EntityKind, tuning: &Tuning) -> f32 {
    match kind {
        EntityKind::Bonus => tuning.bonus_size,
        EntityKind::Obstacle => {
            if tuning.obstacle_max_size > tuning.obstacle_min_size {
                rng.random_range(tuning.obstacle_min_size..=tuning.obstacle_max_size)
            } else {
                tuning.obstacle_min_size
            }
        }
    }
}

/// Uniform left edge in [0, field_width - size]; 0 when the range is empty
pub fn roll_x<R: Rng>(rng: &mut R, field_width: f32, size: f32) -> f32 {
    let max_x = field_width - size;
    if max_x > 0.0 {
        rng.random_range(0.0..=max_x)
    } else {
        0.0
    }
}

/// Roll a complete spawn for the current state of play
pub fn plan_spawn<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
    score: u32,
    field_width: f32,
) -> SpawnPlan {
    let kind = roll_kind(rng, tuning.bonus_chance);
    let size = roll_size(rng, kind, tuning);
    let x = roll_x(rng, field_width, size);
    SpawnPlan {
        kind,
        size,
        x,
        fall_duration_ms: fall_duration_ms(&tuning.difficulty, level, score),
    }
}
