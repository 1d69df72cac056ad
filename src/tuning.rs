//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON file can override any subset of them because the
//! struct deserializes with `#[serde(default)]`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io(std::io::Error),
    /// The JSON was malformed or had a field of the wrong type.
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can work with.
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "invalid tuning json: {}", e),
            TuningError::OutOfRange { field, expected } => {
                write!(f, "tuning field '{}' out of range (expected {})", field, expected)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `TuningError` as the error type.
pub type TuningResult<T> = Result<T, TuningError>;

/// How fast entities fall as the run progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum Difficulty {
    /// `max(min_ms, base_ms - (level - 1) * step_ms)`
    PerLevel { base_ms: u64, step_ms: u64, min_ms: u64 },
    /// `max(min_ms, base_ms - score * step_ms)`
    PerPoint { base_ms: u64, step_ms: u64, min_ms: u64 },
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::PerLevel {
            base_ms: BASE_FALL_MS,
            step_ms: LEVEL_STEP_MS,
            min_ms: MIN_FALL_MS,
        }
    }
}

impl Difficulty {
    fn bounds(&self) -> (u64, u64) {
        match *self {
            Difficulty::PerLevel { base_ms, min_ms, .. }
            | Difficulty::PerPoint { base_ms, min_ms, .. } => (base_ms, min_ms),
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub field_width: f32,
    pub field_height: f32,
    pub ball_width: f32,
    pub ball_height: f32,
    /// Gap between the ball's bottom edge and the field bottom
    pub ball_bottom_margin: f32,

    // === Cadence ===
    pub spawn_period_ms: u64,
    pub poll_period_ms: u64,

    // === Spawning ===
    pub obstacle_min_size: f32,
    pub obstacle_max_size: f32,
    pub bonus_size: f32,
    /// Probability (0-1) that a spawn is a Bonus; 0 disables bonuses
    pub bonus_chance: f64,
    pub difficulty: Difficulty,

    // === Progression ===
    pub bonus_points: u32,
    pub points_per_level: u32,
    /// `None` = sudden death (first obstacle hit ends the run)
    pub starting_lives: Option<u32>,
    /// Pause for acknowledgment when the level changes
    pub level_ups: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            ball_bottom_margin: BALL_BOTTOM_MARGIN,

            spawn_period_ms: SPAWN_PERIOD_MS,
            poll_period_ms: POLL_PERIOD_MS,

            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            bonus_size: BONUS_SIZE,
            bonus_chance: BONUS_CHANCE,
            difficulty: Difficulty::default(),

            bonus_points: BONUS_POINTS,
            points_per_level: POINTS_PER_LEVEL,
            starting_lives: Some(STARTING_LIVES),
            level_ups: true,
        }
    }
}

impl Tuning {
    /// Classic arcade rules: one life, obstacles only, speed
    /// scales with every point, no level-up pauses
    pub fn classic() -> Self {
        Self {
            bonus_chance: 0.0,
            starting_lives: None,
            level_ups: false,
            difficulty: Difficulty::PerPoint {
                base_ms: BASE_FALL_MS,
                step_ms: POINT_STEP_MS,
                min_ms: MIN_FALL_MS,
            },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> TuningResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> TuningResult<()> {
        fn check(ok: bool, field: &'static str, expected: &'static str) -> TuningResult<()> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, expected })
            }
        }

        check(self.field_width > 0.0, "field_width", "> 0")?;
        check(self.field_height > 0.0, "field_height", "> 0")?;
        check(self.ball_width > 0.0, "ball_width", "> 0")?;
        check(self.ball_height > 0.0, "ball_height", "> 0")?;
        check(self.ball_bottom_margin >= 0.0, "ball_bottom_margin", ">= 0")?;
        check(self.spawn_period_ms > 0, "spawn_period_ms", "> 0")?;
        check(self.poll_period_ms > 0, "poll_period_ms", "> 0")?;
        check(self.obstacle_min_size > 0.0, "obstacle_min_size", "> 0")?;
        check(
            self.obstacle_max_size >= self.obstacle_min_size,
            "obstacle_max_size",
            ">= obstacle_min_size",
        )?;
        check(self.bonus_size > 0.0, "bonus_size", "> 0")?;
        check(
            (0.0..=1.0).contains(&self.bonus_chance),
            "bonus_chance",
            "0.0..=1.0",
        )?;
        check(self.points_per_level > 0, "points_per_level", "> 0")?;
        check(self.starting_lives != Some(0), "starting_lives", "null or >= 1")?;

        let (base_ms, min_ms) = self.difficulty.bounds();
        check(min_ms > 0, "difficulty.min_ms", "> 0")?;
        check(base_ms >= min_ms, "difficulty.base_ms", ">= difficulty.min_ms")?;
        Ok(())
    }

    /// Fixed vertical position (top edge) of the ball
    pub fn ball_y(&self, field_height: f32) -> f32 {
        (field_height - self.ball_bottom_margin - self.ball_height).max(0.0)
    }
}
