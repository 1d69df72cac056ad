//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond clock only (driven by the host)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod control;
pub mod motion;
pub mod progression;
pub mod scheduler;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_entity_collision, overlaps};
pub use control::{BallController, DragPhase};
pub use motion::{fall_progress, has_landed, y_at};
pub use progression::{LifeOutcome, ScoreOutcome, level_for_score};
pub use scheduler::{Scheduler, Timer, TimerKind};
pub use spawner::{SpawnPlan, fall_duration_ms, plan_spawn, roll_kind, roll_size, roll_x};
pub use state::{
    Ball, EntityKind, EntityState, FallingEntity, GameEvent, GamePhase, GameState, RetireCause,
    SoundCue,
};
pub use tick::{Game, GameInput};
