//! Headless demo runner
//!
//! Drives the simulation with a simple autopilot at real time: wall-clock
//! frames feed a fixed-timestep accumulator, each frame clamped so a stall
//! cannot tunnel entities through each other. Useful for profiling,
//! balance checks and watching the event stream without a renderer.
//!
//! Usage: `space-hunter [difficulty] [seed]`

use std::path::Path;
use std::time::Instant;

use glam::Vec2;

use space_hunter::consts::{MAX_FRAME_MS, MS_PER_TICK, TICK_HZ};
use space_hunter::sim::{tick, GameEvent, GamePhase, GameState, TickInput};
use space_hunter::{Difficulty, HighScores, Settings};

const HIGHSCORES_PATH: &str = "highscores.json";
const SETTINGS_PATH: &str = "settings.json";

/// Demo session length in simulated seconds
const DEMO_SECONDS: u64 = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = Settings::load_or_default(Path::new(SETTINGS_PATH));
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or(settings.difficulty);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        std::time::UNIX_EPOCH
            .elapsed()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = GameState::new(seed);
    state.start_session(difficulty);

    let mut accumulator = 0.0;
    let mut last_frame = Instant::now();
    let tick_budget = DEMO_SECONDS * TICK_HZ as u64;

    while state.phase != GamePhase::GameOver && state.time_ticks < tick_budget {
        let now = Instant::now();
        let frame_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
        accumulator += frame_ms.min(MAX_FRAME_MS);

        while accumulator >= MS_PER_TICK {
            accumulator -= MS_PER_TICK;
            let input = autopilot(&state);
            tick(&mut state, &input);
            for event in state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => {
                        log::info!("Level {level}, score {}", state.score)
                    }
                    GameEvent::BonusWave => log::info!("Bonus wave"),
                    GameEvent::PowerupCollected(kind) => {
                        log::info!("Powerup collected: {kind:?}")
                    }
                    GameEvent::Healed { amount } => log::info!("Healed {amount} HP"),
                    _ => {}
                }
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    log::info!(
        "Demo finished: score {}, level {}, {} ticks (seed {seed})",
        state.score,
        state.level,
        state.time_ticks
    );

    let date = std::time::UNIX_EPOCH
        .elapsed()
        .map(|d| format!("{}", d.as_secs()))
        .unwrap_or_default();
    let mut scores = HighScores::load_or_default(Path::new(HIGHSCORES_PATH));
    if let Some(rank) = scores.add_score("BOT", state.score, &date) {
        log::info!("New high score, rank {rank}");
        if let Err(e) = scores.save(Path::new(HIGHSCORES_PATH)) {
            log::warn!("Could not save high scores: {e}");
        }
    }
}

/// Trivial autopilot: aim and fire at the nearest asteroid while nudging
/// away from it when it gets close
fn autopilot(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let nearest = state
        .asteroids
        .iter()
        .min_by(|a, b| {
            let da = ship.pos.distance_squared(a.pos);
            let db = ship.pos.distance_squared(b.pos);
            da.total_cmp(&db)
        })
        .map(|a| (a.pos, a.radius));

    let Some((target, radius)) = nearest else {
        return TickInput::default();
    };

    let to_target = target - ship.pos;
    let evade = to_target.length() < radius + 120.0;
    let joystick = if evade && to_target.length_squared() > f32::EPSILON {
        -to_target.normalize()
    } else {
        Vec2::ZERO
    };

    TickInput {
        firing: true,
        pointer: Some(target),
        joystick,
        ..Default::default()
    }
}
