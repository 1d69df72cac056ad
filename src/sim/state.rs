//! Game state and core simulation types
//!
//! The ball, the falling entities, the progression counters and the events the
//! simulation reports to the presentation layer.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::motion;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level-up acknowledgment pending; spawning and motion are frozen
    LevelingUp,
    /// Run ended
    GameOver,
}

/// What kind of thing is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Costs a life on contact, scores if it reaches the bottom
    Obstacle,
    /// Scores on contact, nothing if missed
    Bonus,
}

/// Lifecycle of a falling entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    Falling,
    Retired,
}

/// Why an entity left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireCause {
    /// Fell past the bottom of the field
    BottomReached,
    /// Obstacle hit the ball
    Collided,
    /// Bonus caught by the ball
    Collected,
}

/// Sound cues for the audio layer (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    ScoreSound,
    CollisionSound,
    GameOverSound,
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed row)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Largest legal x for a field of the given width (never negative)
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.width).max(0.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A falling obstacle or bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Side length (entities are square)
    pub size: f32,
    /// Left edge, fixed at spawn
    pub x: f32,
    /// Top edge, advanced by the motion model
    pub y: f32,
    pub fall_duration_ms: u64,
    /// Un-paused time spent falling
    pub elapsed_ms: u64,
    /// Clock time the elapsed counter was last brought up to date
    pub last_advanced_ms: u64,
    pub state: EntityState,
}

impl FallingEntity {
    pub fn new(
        id: u32,
        kind: EntityKind,
        size: f32,
        x: f32,
        fall_duration_ms: u64,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            kind,
            size,
            x,
            y: 0.0,
            fall_duration_ms,
            elapsed_ms: 0,
            last_advanced_ms: now_ms,
            state: EntityState::Falling,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == EntityState::Falling
    }

    /// Bring elapsed time and y up to `now_ms`
    pub fn advance(&mut self, now_ms: u64, field_height: f32) {
        if !self.is_falling() {
            return;
        }
        self.elapsed_ms += now_ms.saturating_sub(self.last_advanced_ms);
        self.last_advanced_ms = now_ms;
        self.y = motion::y_at(self.elapsed_ms, self.fall_duration_ms, field_height);
    }

    /// Forget clock time that passed while frozen
    pub fn resume_at(&mut self, now_ms: u64) {
        self.last_advanced_ms = now_ms;
    }

    pub fn has_landed(&self) -> bool {
        motion::has_landed(self.elapsed_ms, self.fall_duration_ms)
    }

    /// Mark retired. Returns false if it already was.
    pub fn retire(&mut self) -> bool {
        if self.state == EntityState::Retired {
            return false;
        }
        self.state = EntityState::Retired;
        true
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// Score, level and lives; the progression state machine operates on this
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    /// `None` in sudden-death runs
    pub lives: Option<u32>,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(starting_lives: Option<u32>) -> Self {
        Self {
            score: 0,
            level: 1,
            lives: starting_lives,
            phase: GamePhase::Playing,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::LevelingUp
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Everything the presentation/audio layer needs to hear about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Spawned {
        id: u32,
        kind: EntityKind,
        x: f32,
        size: f32,
        fall_duration_ms: u64,
    },
    Retired {
        id: u32,
        cause: RetireCause,
    },
    BallMoved {
        x: f32,
    },
    ScoreChanged {
        score: u32,
        emphasis: bool,
    },
    LevelChanged {
        level: u32,
    },
    LivesChanged {
        lives: u32,
        emphasis: bool,
    },
    Sound {
        cue: SoundCue,
    },
    ShowLevelUp {
        level: u32,
    },
    ShowGameOver {
        score: u32,
        level: u32,
        /// Session leaderboard rank, if the score made the table
        rank: Option<usize>,
    },
}
