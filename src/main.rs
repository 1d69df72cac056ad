//! Ball Wall entry point
//!
//! Headless runner: plays one autopilot session on the virtual clock and
//! prints a JSON summary. Usage: `ball-wall [seed] [tuning.json]`

use serde::Serialize;

use ball_wall::sim::{Game, GameEvent, GameInput, autopilot};
use ball_wall::{Settings, Tuning};

/// Host frame length (ms)
const FRAME_MS: u64 = 16;
/// Stop the session after five minutes of game time
const TIME_LIMIT_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    score: u32,
    level: u32,
    lives: Option<u32>,
    game_over: bool,
    elapsed_ms: u64,
    spawned: u32,
    dodged: u32,
    collected: u32,
    hits: u32,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("ball-wall: {}", e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Ball Wall (headless) starting...");
    let summary = run_session(tuning, seed);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

fn run_session(tuning: Tuning, seed: u64) -> RunSummary {
    use ball_wall::sim::RetireCause;

    let mut game = Game::with_settings(tuning, Settings::muted(), seed);
    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };

    while !game.state().is_game_over() && game.now_ms() < TIME_LIMIT_MS {
        if let Some(target) = autopilot::steer(&game) {
            for input in autopilot::drag_inputs(game.ball().x, target) {
                game.handle_input(input);
            }
        }
        game.advance(FRAME_MS);

        let mut acknowledge = false;
        for event in game.drain_events() {
            match &event {
                GameEvent::Spawned { .. } => summary.spawned += 1,
                GameEvent::Retired { cause, .. } => match cause {
                    RetireCause::BottomReached => summary.dodged += 1,
                    RetireCause::Collected => summary.collected += 1,
                    RetireCause::Collided => summary.hits += 1,
                },
                GameEvent::ShowLevelUp { level } => {
                    log::info!("Level {} - acknowledging", level);
                    acknowledge = true;
                }
                GameEvent::ShowGameOver { score, rank, .. } => {
                    log::info!("Game over: score {} (rank {:?})", score, rank);
                }
                _ => {}
            }
            if let Ok(json) = serde_json::to_string(&event) {
                log::trace!("{}", json);
            }
        }
        if acknowledge {
            game.handle_input(GameInput::AcknowledgeLevelUp);
        }
    }

    summary.score = game.state().score;
    summary.level = game.state().level;
    summary.lives = game.state().lives;
    summary.game_over = game.state().is_game_over();
    summary.elapsed_ms = game.now_ms();

    game.handle_input(GameInput::Exit);
    summary
}
