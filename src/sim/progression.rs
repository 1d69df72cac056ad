//! Score, level and lives state machine
//!
//! `Playing -> LevelingUp` when a score change crosses a level threshold,
//! `LevelingUp -> Playing` on acknowledgment, `Playing -> GameOver` when the
//! last life goes. `GameOver` is terminal: every operation below is a no-op
//! there, and only a full restart builds a fresh [`GameState`].

use super::state::{GamePhase, GameState};

/// `floor(score / points_per_level) + 1`
#[inline]
pub fn level_for_score(score: u32, points_per_level: u32) -> u32 {
    score / points_per_level.max(1) + 1
}

/// Result of a score change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: u32,
    /// Set when the level went up
    pub new_level: Option<u32>,
    /// True when the change entered `LevelingUp`
    pub paused: bool,
}

/// Result of an obstacle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeOutcome {
    /// Remaining lives (`None` in sudden-death runs)
    pub lives: Option<u32>,
    pub game_over: bool,
}

impl GameState {
    /// Add points and run the level-up check. Ignored unless playing.
    pub fn award_points(
        &mut self,
        points: u32,
        points_per_level: u32,
        pause_on_level_up: bool,
    ) -> Option<ScoreOutcome> {
        if !self.is_playing() {
            return None;
        }

        self.score = self.score.saturating_add(points);
        let level = level_for_score(self.score, points_per_level);

        let mut outcome = ScoreOutcome {
            score: self.score,
            new_level: None,
            paused: false,
        };

        if level > self.level {
            self.level = level;
            outcome.new_level = Some(level);
            if pause_on_level_up {
                self.phase = GamePhase::LevelingUp;
                outcome.paused = true;
                log::info!("Level up: level {} at score {}", level, self.score);
            } else {
                log::debug!("Level {} reached (no pause)", level);
            }
        }

        Some(outcome)
    }

    /// Take one life for an obstacle hit. Ignored unless playing.
    pub fn lose_life(&mut self) -> Option<LifeOutcome> {
        if !self.is_playing() {
            return None;
        }

        let game_over = match self.lives.as_mut() {
            Some(lives) => {
                *lives = lives.saturating_sub(1);
                *lives == 0
            }
            // Sudden death
            None => true,
        };

        if game_over {
            self.phase = GamePhase::GameOver;
            log::info!("Game over at score {} (level {})", self.score, self.level);
        }

        Some(LifeOutcome {
            lives: self.lives,
            game_over,
        })
    }

    /// Leave `LevelingUp`. Returns false if no acknowledgment was pending.
    pub fn acknowledge_level_up(&mut self) -> bool {
        if self.phase != GamePhase::LevelingUp {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }
}
