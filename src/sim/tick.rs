//! Tick dispatch
//!
//! [`Game`] owns the scheduler, the active-entity registry and the
//! progression state, and turns host input plus elapsed time into
//! [`GameEvent`]s. One central poll tick walks every falling entity; a tick
//! that fires after game over, during a level-up pause or after teardown
//! does nothing and does not reschedule itself.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::ball_entity_collision;
use super::control::{BallController, DragPhase};
use super::progression::ScoreOutcome;
use super::scheduler::{Scheduler, TimerKind};
use super::spawner::plan_spawn;
use super::state::{Ball, EntityKind, FallingEntity, GameEvent, GameState, RetireCause, SoundCue};
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameInput {
    /// Horizontal drag gesture
    Drag { phase: DragPhase, x: f32 },
    /// Level-up dialog dismissed
    AcknowledgeLevelUp,
    /// Full reset; `None` derives the next seed from the current one
    Restart { seed: Option<u64> },
    /// Teardown: cancel every tick and ignore all further input
    Exit,
    /// Field geometry changed
    Resize { width: f32, height: f32 },
}

/// A running game session
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    ball: Ball,
    control: BallController,
    /// Falling entities, ascending by id
    entities: Vec<FallingEntity>,
    scheduler: Scheduler,
    field_width: f32,
    field_height: f32,
    next_id: u32,
    events: Vec<GameEvent>,
    high_scores: HighScores,
    /// 1-based run counter for this session
    run: u32,
    terminated: bool,
}

impl Game {
    /// Start a new game with default settings
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_settings(tuning, Settings::default(), seed)
    }

    pub fn with_settings(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let field_width = tuning.field_width;
        let field_height = tuning.field_height;
        let mut game = Self {
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::new(tuning.starting_lives),
            ball: Self::initial_ball(&tuning, field_width, field_height),
            control: BallController::new(),
            entities: Vec::new(),
            scheduler: Scheduler::new(tuning.spawn_period_ms, tuning.poll_period_ms),
            field_width,
            field_height,
            next_id: 1,
            events: Vec::new(),
            high_scores: HighScores::new(),
            run: 1,
            terminated: false,
            tuning,
            settings,
            seed,
        };
        game.scheduler.schedule_spawn_loop();
        log::info!("Game started with seed {}", seed);
        game
    }

    fn initial_ball(tuning: &Tuning, field_width: f32, field_height: f32) -> Ball {
        let x = ((field_width - tuning.ball_width) / 2.0).max(0.0);
        Ball::new(
            x,
            tuning.ball_y(field_height),
            tuning.ball_width,
            tuning.ball_height,
        )
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Entities still falling
    pub fn entities(&self) -> &[FallingEntity] {
        &self.entities
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn field_size(&self) -> (f32, f32) {
        (self.field_width, self.field_height)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Clock ===

    /// Advance the virtual clock, firing every tick that falls due
    pub fn advance(&mut self, dt_ms: u64) {
        if self.terminated {
            return;
        }
        let target = self.scheduler.now_ms().saturating_add(dt_ms);
        while let Some(timer) = self.scheduler.pop_due(target) {
            match timer.kind {
                TimerKind::Spawn => self.on_spawn_tick(),
                TimerKind::CollisionPoll => self.on_poll_tick(),
            }
        }
        self.scheduler.advance_clock(target);
    }

    fn on_spawn_tick(&mut self) {
        if !self.state.is_playing() {
            log::debug!("Spawn loop stopped ({:?})", self.state.phase);
            return;
        }

        let plan = plan_spawn(
            &mut self.rng,
            &self.tuning,
            self.state.level,
            self.state.score,
            self.field_width,
        );
        let id = self.next_id;
        self.next_id += 1;

        let now = self.scheduler.now_ms();
        self.entities.push(FallingEntity::new(
            id,
            plan.kind,
            plan.size,
            plan.x,
            plan.fall_duration_ms,
            now,
        ));
        log::debug!(
            "Spawned {:?} #{} at x={:.1} size={:.1} ({} ms)",
            plan.kind,
            id,
            plan.x,
            plan.size,
            plan.fall_duration_ms
        );
        self.events.push(GameEvent::Spawned {
            id,
            kind: plan.kind,
            x: plan.x,
            size: plan.size,
            fall_duration_ms: plan.fall_duration_ms,
        });

        self.scheduler.schedule_spawn_loop();
        self.scheduler.schedule_collision_poll();
    }

    fn on_poll_tick(&mut self) {
        if !self.state.is_playing() {
            log::trace!("Poll loop stopped ({:?})", self.state.phase);
            return;
        }

        // Everything moves to `now` first so a pause entered below freezes
        // all entities at the same instant
        let now = self.scheduler.now_ms();
        for entity in self.entities.iter_mut().filter(|e| e.is_falling()) {
            entity.advance(now, self.field_height);
        }

        for idx in 0..self.entities.len() {
            // A level-up or game over freezes whatever is left this tick
            if !self.state.is_playing() {
                break;
            }
            if !self.entities[idx].is_falling() {
                continue;
            }
            if ball_entity_collision(&self.ball, &self.entities[idx]) {
                self.retire_by_collision(idx);
            } else if self.entities[idx].has_landed() {
                self.retire_by_landing(idx);
            }
        }
        self.sweep_retired();

        if self.state.is_playing() && !self.entities.is_empty() {
            self.scheduler.schedule_collision_poll();
        }
    }

    // === Retirement (exactly once per entity) ===

    /// Evaluate one entity against the ball right now. Returns true if it
    /// was retired by this call.
    pub fn check_collision(&mut self, id: u32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if !self.entities[idx].is_falling() {
            return false;
        }
        let now = self.scheduler.now_ms();
        self.entities[idx].advance(now, self.field_height);

        let retired = ball_entity_collision(&self.ball, &self.entities[idx])
            && self.retire_by_collision(idx);
        self.sweep_retired();
        retired
    }

    /// Report that an entity reached the bottom (for hosts that animate the
    /// fall themselves). Ignored unless playing. Returns true if it was
    /// retired by this call.
    pub fn resolve_landed(&mut self, id: u32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let retired = self.retire_by_landing(idx);
        self.sweep_retired();
        retired
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    fn retire_by_collision(&mut self, idx: usize) -> bool {
        if !self.state.is_playing() || !self.entities[idx].retire() {
            return false;
        }
        let entity = &self.entities[idx];
        let (id, kind) = (entity.id, entity.kind);

        match kind {
            EntityKind::Obstacle => {
                log::debug!("Obstacle #{} hit the ball", id);
                self.events.push(GameEvent::Retired {
                    id,
                    cause: RetireCause::Collided,
                });
                self.cue(SoundCue::CollisionSound);
                if let Some(outcome) = self.state.lose_life() {
                    if let Some(lives) = outcome.lives {
                        self.events.push(GameEvent::LivesChanged {
                            lives,
                            emphasis: self.settings.effective_emphasis(),
                        });
                    }
                    if outcome.game_over {
                        self.enter_game_over();
                    }
                }
            }
            EntityKind::Bonus => {
                log::debug!("Bonus #{} collected", id);
                self.events.push(GameEvent::Retired {
                    id,
                    cause: RetireCause::Collected,
                });
                let outcome = self.state.award_points(
                    self.tuning.bonus_points,
                    self.tuning.points_per_level,
                    self.tuning.level_ups,
                );
                self.on_score(outcome);
            }
        }
        true
    }

    fn retire_by_landing(&mut self, idx: usize) -> bool {
        if !self.entities[idx].retire() {
            return false;
        }
        let entity = &self.entities[idx];
        let (id, kind) = (entity.id, entity.kind);
        self.events.push(GameEvent::Retired {
            id,
            cause: RetireCause::BottomReached,
        });

        // Dodged obstacles score; missed bonuses don't
        if kind == EntityKind::Obstacle {
            let outcome = self.state.award_points(
                1,
                self.tuning.points_per_level,
                self.tuning.level_ups,
            );
            self.on_score(outcome);
        }
        true
    }

    fn sweep_retired(&mut self) {
        self.entities.retain(FallingEntity::is_falling);
    }

    // === Progression side effects ===

    fn on_score(&mut self, outcome: Option<ScoreOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };
        self.events.push(GameEvent::ScoreChanged {
            score: outcome.score,
            emphasis: self.settings.effective_emphasis(),
        });
        self.cue(SoundCue::ScoreSound);

        if let Some(level) = outcome.new_level {
            self.events.push(GameEvent::LevelChanged { level });
            if outcome.paused {
                self.events.push(GameEvent::ShowLevelUp { level });
            }
        }
    }

    fn enter_game_over(&mut self) {
        self.scheduler.cancel_all();
        self.control.release();
        let rank = self
            .high_scores
            .add_score(self.state.score, self.state.level, self.run);
        if let Some(rank) = rank {
            log::info!("Score {} ranked #{} this session", self.state.score, rank);
        }
        self.cue(SoundCue::GameOverSound);
        self.events.push(GameEvent::ShowGameOver {
            score: self.state.score,
            level: self.state.level,
            rank,
        });
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.settings.sound_cues {
            self.events.push(GameEvent::Sound { cue });
        }
    }

    // === Input ===

    pub fn handle_input(&mut self, input: GameInput) {
        if self.terminated {
            log::debug!("Ignoring {:?} after exit", input);
            return;
        }

        match input {
            GameInput::Drag { phase, x } => self.on_drag(phase, x),
            GameInput::AcknowledgeLevelUp => self.acknowledge_level_up(),
            GameInput::Restart { seed } => {
                let seed = seed.unwrap_or_else(|| self.seed.wrapping_add(1));
                self.restart(seed);
            }
            GameInput::Exit => {
                self.scheduler.cancel_all();
                self.control.release();
                self.terminated = true;
                log::info!("Game torn down at {} ms", self.scheduler.now_ms());
            }
            GameInput::Resize { width, height } => self.resize(width, height),
        }
    }

    fn on_drag(&mut self, phase: DragPhase, x: f32) {
        if self.state.is_game_over() {
            return;
        }
        match phase {
            DragPhase::Start => self.control.begin(self.ball.x, x),
            DragPhase::Move => {
                let max_x = self.ball.max_x(self.field_width);
                if let Some(new_x) = self.control.drag_to(x, max_x) {
                    self.move_ball(new_x);
                }
            }
        }
    }

    fn move_ball(&mut self, x: f32) {
        if x != self.ball.x {
            self.ball.x = x;
            self.events.push(GameEvent::BallMoved { x });
        }
    }

    fn acknowledge_level_up(&mut self) {
        if !self.state.acknowledge_level_up() {
            return;
        }
        let now = self.scheduler.now_ms();
        for entity in &mut self.entities {
            entity.resume_at(now);
        }
        self.scheduler.schedule_spawn_loop();
        if !self.entities.is_empty() {
            self.scheduler.schedule_collision_poll();
        }
        log::info!("Resumed at level {}", self.state.level);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.field_width = width.max(0.0);
        self.field_height = height.max(0.0);
        self.ball.y = self.tuning.ball_y(self.field_height);
        let clamped = self.ball.x.clamp(0.0, self.ball.max_x(self.field_width));
        self.move_ball(clamped);
        log::debug!("Field resized to {}x{}", self.field_width, self.field_height);
    }

    /// Throw away the run and start over. Tuning, settings, field geometry
    /// and the session leaderboard carry over; everything else is rebuilt.
    pub fn restart(&mut self, seed: u64) {
        self.scheduler = Scheduler::new(self.tuning.spawn_period_ms, self.tuning.poll_period_ms);
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
        self.state = GameState::new(self.tuning.starting_lives);
        self.ball = Self::initial_ball(&self.tuning, self.field_width, self.field_height);
        self.control = BallController::new();
        self.entities.clear();
        self.events.clear();
        self.next_id = 1;
        self.run += 1;
        self.scheduler.schedule_spawn_loop();
        log::info!("Restarted (run {}) with seed {}", self.run, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityState, GamePhase};

    const SEED: u64 = 12345;

    /// Obstacles only, so spawns are predictable
    fn obstacle_tuning() -> Tuning {
        Tuning {
            bonus_chance: 0.0,
            ..Tuning::default()
        }
    }

    /// Put an entity straight into the registry at the current time
    fn inject(game: &mut Game, kind: EntityKind, x: f32, size: f32, duration_ms: u64) -> u32 {
        let id = game.next_id;
        game.next_id += 1;
        let now = game.now_ms();
        game.entities
            .push(FallingEntity::new(id, kind, size, x, duration_ms, now));
        game.scheduler.schedule_collision_poll();
        id
    }

    /// Park the ball in the far corner so falling entities miss it
    fn park_ball_left(game: &mut Game) {
        game.ball.x = 0.0;
    }

    fn has_event(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> bool {
        events.iter().any(pred)
    }

    #[test]
    fn test_first_spawn_after_one_period() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.advance(999);
        assert!(game.entities().is_empty());
        game.advance(1);
        assert_eq!(game.entities().len(), 1);
        let events = game.drain_events();
        assert!(matches!(events[0], GameEvent::Spawned { id: 1, fall_duration_ms: 2000, .. }));
    }

    #[test]
    fn test_dodged_obstacle_scores_one() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        park_ball_left(&mut game);
        let id = inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 200);
        game.advance(200);

        assert_eq!(game.state().score, 1);
        let events = game.drain_events();
        assert!(has_event(&events, |e| *e
            == GameEvent::Retired {
                id,
                cause: RetireCause::BottomReached
            }));
        assert!(has_event(&events, |e| matches!(e, GameEvent::ScoreChanged { score: 1, .. })));
        assert!(has_event(&events, |e| *e
            == GameEvent::Sound {
                cue: SoundCue::ScoreSound
            }));
        assert!(game.entities().iter().all(|e| e.id != id));
    }

    #[test]
    fn test_missed_bonus_scores_nothing() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        park_ball_left(&mut game);
        inject(&mut game, EntityKind::Bonus, 300.0, 100.0, 200);
        game.advance(200);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_caught_bonus_scores_ten() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        let ball_x = game.ball().x;
        let id = inject(&mut game, EntityKind::Bonus, ball_x, 100.0, 1000);
        game.advance(1000);

        assert_eq!(game.state().score, 10);
        let events = game.drain_events();
        assert!(has_event(&events, |e| *e
            == GameEvent::Retired {
                id,
                cause: RetireCause::Collected
            }));
    }

    #[test]
    fn test_obstacle_hit_costs_a_life() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        let ball_x = game.ball().x;
        let id = inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 1000);
        game.advance(1000);

        assert_eq!(game.state().lives, Some(2));
        assert_eq!(game.state().score, 0);
        let events = game.drain_events();
        assert!(has_event(&events, |e| *e
            == GameEvent::Retired {
                id,
                cause: RetireCause::Collided
            }));
        assert!(has_event(&events, |e| matches!(e, GameEvent::LivesChanged { lives: 2, .. })));
    }

    #[test]
    fn test_last_life_is_game_over_and_ticks_go_quiet() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.state.lives = Some(1);
        let ball_x = game.ball().x;
        inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 1000);
        let bystander = inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 5000);
        game.advance(1000);

        assert_eq!(game.state().lives, Some(0));
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(game.scheduler().pending(), 0);
        let events = game.drain_events();
        assert!(has_event(&events, |e| matches!(
            e,
            GameEvent::ShowGameOver { score: 0, level: 1, .. }
        )));

        // Stale work after game over is a no-op
        game.advance(10_000);
        assert!(game.drain_events().is_empty());
        assert!(!game.check_collision(bystander));
        assert!(!game.resolve_landed(bystander));
        assert_eq!(game.state().lives, Some(0));
    }

    #[test]
    fn test_sudden_death() {
        let mut game = Game::new(Tuning::classic(), SEED);
        let ball_x = game.ball().x;
        inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 1000);
        game.advance(1000);
        assert!(game.state().is_game_over());
        assert_eq!(game.state().lives, None);
    }

    #[test]
    fn test_retirement_race_either_order() {
        // Landing first, then the collision check
        let mut game = Game::new(obstacle_tuning(), SEED);
        let ball_x = game.ball().x;
        let id = inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 1000);
        game.entities[0].y = 640.0; // overlapping the ball
        assert!(game.resolve_landed(id));
        assert!(!game.check_collision(id));
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().lives, Some(3));

        // Collision first, then the landing report
        let mut game = Game::new(obstacle_tuning(), SEED);
        let id = inject(&mut game, EntityKind::Obstacle, ball_x, 60.0, 1000);
        game.scheduler.advance_clock(1000 * 640 / 800);
        assert!(game.check_collision(id));
        assert!(!game.resolve_landed(id));
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().lives, Some(2));

        let retired = game
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Retired { .. }))
            .count();
        assert_eq!(retired, 1);
    }

    #[test]
    fn test_retire_guard_on_registry_entry() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        inject(&mut game, EntityKind::Obstacle, 0.0, 60.0, 1000);
        assert!(game.retire_by_landing(0));
        assert!(!game.retire_by_collision(0));
        assert!(!game.retire_by_landing(0));
        assert_eq!(game.entities[0].state, EntityState::Retired);
    }

    #[test]
    fn test_level_up_freezes_until_acknowledged() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        park_ball_left(&mut game);
        game.state.score = 29;
        // This one lands and crosses the threshold
        inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 100);
        // This one is mid-flight when the pause starts
        let frozen = inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 2000);
        game.advance(100);

        assert_eq!(game.state().level, 2);
        assert!(game.state().is_paused());
        let events = game.drain_events();
        let level_ups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ShowLevelUp { level: 2 }))
            .count();
        assert_eq!(level_ups, 1);

        // Long pause: nothing spawns, nothing moves
        let y_before = game.entities()[0].y;
        game.advance(10_000);
        assert_eq!(game.entities().len(), 1);
        assert_eq!(game.entities()[0].id, frozen);
        assert_eq!(game.entities()[0].y, y_before);
        assert!(!game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Spawned { .. })));

        game.handle_input(GameInput::AcknowledgeLevelUp);
        assert!(game.state().is_playing());

        // The in-flight entity picks up where it left off (1900 ms to go)
        game.advance(1000);
        assert!(game.entities().iter().any(|e| e.id == frozen));
        game.advance(899);
        assert!(game.entities().iter().any(|e| e.id == frozen));
        game.advance(1);
        assert!(game.entities().iter().all(|e| e.id != frozen));
        assert_eq!(game.state().score, 31);

        // Spawning resumed one period after acknowledgment
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Spawned { fall_duration_ms: 1700, .. })));
    }

    #[test]
    fn test_landing_report_ignored_while_paused() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        park_ball_left(&mut game);
        game.state.score = 29;
        inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 100);
        let frozen = inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 2000);
        game.advance(100);
        assert!(game.state().is_paused());

        assert!(!game.resolve_landed(frozen));
        assert_eq!(game.entities().len(), 1);
        assert_eq!(game.state().score, 30);

        // The dodge still counts once play resumes
        game.handle_input(GameInput::AcknowledgeLevelUp);
        game.advance(1900);
        assert!(game.entities().iter().all(|e| e.id != frozen));
        assert_eq!(game.state().score, 31);
    }

    #[test]
    fn test_level_up_mid_tick_freezes_all_entities_together() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        park_ball_left(&mut game);
        game.state.score = 29;
        let before = inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 5000);
        inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 100);
        let after = inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 5000);
        game.advance(100);
        assert!(game.state().is_paused());

        let elapsed = |id: u32| {
            game.entities()
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.elapsed_ms)
        };
        assert_eq!(elapsed(before), Some(100));
        assert_eq!(elapsed(after), Some(100));
    }

    #[test]
    fn test_huge_time_step_does_not_overflow() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.advance(5);
        game.advance(u64::MAX);
        assert_eq!(game.now_ms(), u64::MAX);
        // Stationary ball: hits or dodges end the run or pause it long before
        assert!(!game.state().is_playing());

        game.handle_input(GameInput::AcknowledgeLevelUp);
        game.advance(u64::MAX);
        assert_eq!(game.now_ms(), u64::MAX);
    }

    #[test]
    fn test_acknowledge_without_level_up_is_ignored() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.handle_input(GameInput::AcknowledgeLevelUp);
        assert!(game.state().is_playing());
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn test_drag_clamps_to_field() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.handle_input(GameInput::Resize {
            width: 400.0,
            height: 800.0,
        });
        game.ball.x = 0.0;
        game.handle_input(GameInput::Drag {
            phase: DragPhase::Start,
            x: 0.0,
        });
        game.handle_input(GameInput::Drag {
            phase: DragPhase::Move,
            x: 500.0,
        });
        assert_eq!(game.ball().x, 350.0);
        assert!(game
            .drain_events()
            .contains(&GameEvent::BallMoved { x: 350.0 }));
    }

    #[test]
    fn test_resize_reclamps_ball() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.ball.x = 350.0;
        game.handle_input(GameInput::Resize {
            width: 200.0,
            height: 600.0,
        });
        assert_eq!(game.ball().x, 150.0);
        assert_eq!(game.ball().y, 450.0);

        // Narrower than the ball: pinned at 0
        game.handle_input(GameInput::Resize {
            width: 30.0,
            height: 600.0,
        });
        assert_eq!(game.ball().x, 0.0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.state.score = 42;
        game.state.level = 2;
        game.state.lives = Some(1);
        game.state.phase = GamePhase::GameOver;
        inject(&mut game, EntityKind::Obstacle, 0.0, 60.0, 1000);

        game.handle_input(GameInput::Restart { seed: Some(7) });
        assert_eq!(game.state(), &GameState::new(Some(3)));
        assert!(game.entities().is_empty());
        assert_eq!(game.now_ms(), 0);
        assert_eq!(game.seed(), 7);
        assert_eq!(game.run(), 2);

        game.advance(1000);
        assert_eq!(game.entities().len(), 1);
        assert_eq!(game.entities()[0].id, 1);
    }

    #[test]
    fn test_exit_tears_down() {
        let mut game = Game::new(obstacle_tuning(), SEED);
        game.advance(1500);
        game.handle_input(GameInput::Exit);
        assert!(game.is_terminated());
        assert_eq!(game.scheduler().pending(), 0);

        let before = game.entities().len();
        game.drain_events();
        game.advance(10_000);
        game.handle_input(GameInput::Restart { seed: None });
        assert_eq!(game.entities().len(), before);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_muted_settings_drop_sound_cues() {
        let mut game = Game::with_settings(obstacle_tuning(), Settings::muted(), SEED);
        park_ball_left(&mut game);
        inject(&mut game, EntityKind::Obstacle, 300.0, 50.0, 100);
        game.advance(100);
        let events = game.drain_events();
        assert!(!has_event(&events, |e| matches!(e, GameEvent::Sound { .. })));
        assert!(has_event(&events, |e| matches!(
            e,
            GameEvent::ScoreChanged { emphasis: true, .. }
        )));
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = Game::new(Tuning::default(), 99);
        let mut b = Game::new(Tuning::default(), 99);
        for _ in 0..400 {
            a.advance(16);
            b.advance(16);
        }
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.state(), b.state());
    }
}
