//! Ball Wall - A falling-object dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (sound and emphasis cues)
//! - `highscores`: Session leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning, TuningError, TuningResult};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Play field dimensions (device-independent units)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Ball defaults - ball rides a fixed row near the bottom
    pub const BALL_WIDTH: f32 = 50.0;
    pub const BALL_HEIGHT: f32 = 50.0;
    pub const BALL_BOTTOM_MARGIN: f32 = 100.0;

    /// Spawn cadence (ms)
    pub const SPAWN_PERIOD_MS: u64 = 1000;
    /// Collision poll cadence (ms)
    pub const POLL_PERIOD_MS: u64 = 10;

    /// Obstacle size range (inclusive)
    pub const OBSTACLE_MIN_SIZE: f32 = 50.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 150.0;

    /// Bonus defaults
    pub const BONUS_SIZE: f32 = 100.0;
    pub const BONUS_CHANCE: f64 = 0.2;
    pub const BONUS_POINTS: u32 = 10;

    /// Score needed per level
    pub const POINTS_PER_LEVEL: u32 = 30;
    pub const STARTING_LIVES: u32 = 3;

    /// Fall duration curve (ms)
    pub const BASE_FALL_MS: u64 = 2000;
    pub const LEVEL_STEP_MS: u64 = 300;
    pub const POINT_STEP_MS: u64 = 50;
    pub const MIN_FALL_MS: u64 = 500;
}
