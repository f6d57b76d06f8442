//! Fixed-timestep frame orchestrator
//!
//! [`tick`] advances the simulation exactly one tick in a fixed order:
//! ship, cosmetics, entity motion, pickups, firing, collision resolution,
//! progression, then decay of shake and messages. The host calls it once
//! per accumulated 60 Hz step; everything here is deterministic for a
//! given seed and input sequence.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{spawn_bonus_wave, spawn_wave};
use super::combat;
use super::kinematics;
use super::particles::COLOR_GAS;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Player input sampled for one tick. `pause` is an edge signal: the host
/// sets it on the key press, not while held.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub firing: bool,
    pub pause: bool,
    /// Aim/fire target in playfield coordinates
    pub pointer: Option<Vec2>,
    /// Analog move vector, components in [-1, 1]; zero when unused
    pub joystick: Vec2,
}

/// Advance the simulation one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    kinematics::update_ship(&mut state.ship, input);
    spawn_thrust_particles(state, input);

    let mult = state.speed_multiplier;
    kinematics::update_asteroids(&mut state.asteroids, mult);
    kinematics::update_bullets(&mut state.bullets);
    state.particles.update();
    kinematics::update_starfield(&mut state.stars, mult);

    combat::update_pickups(state);
    combat::update_shooting(state, input);
    combat::resolve_collisions(state);

    update_progression(state);
    update_shake(state);
    update_message(state);
}

/// Exhaust trail while the player is accelerating: a few short-lived
/// particles just behind the ship, drifting opposite the facing
fn spawn_thrust_particles(state: &mut GameState, input: &TickInput) {
    let accelerating =
        input.up || input.down || input.left || input.right || input.joystick != Vec2::ZERO;
    if !accelerating {
        return;
    }

    let facing = state.ship.facing;
    let pos = state.ship.pos;
    let count = state.rng.random_range(2..=3u32);
    for _ in 0..count {
        let offset = state.rng.random_range(13.0..15.0);
        let spread = state.rng.random_range(-0.3..0.3);
        let speed = state.rng.random_range(1.0..2.0);
        state.particles.spawn(
            pos - Vec2::from_angle(facing) * offset,
            Vec2::from_angle(facing + std::f32::consts::PI + spread) * speed,
            15,
            1.0,
            COLOR_GAS,
        );
    }
}

/// Level/bonus-wave progression. Runs after collision resolution so a wave
/// cleared this tick reacts this tick. Nothing here blocks the simulation;
/// the next-wave spawn is a deadline polled every tick.
fn update_progression(state: &mut GameState) {
    let now = state.now_ms();

    if state.asteroids.is_empty() && !state.is_leveling_up {
        let elapsed = now - state.level_start_ms;
        if elapsed < MIN_LEVEL_TIME_MS && state.bonus_waves_spawned < MAX_BONUS_WAVES {
            state.bonus_waves_spawned += 1;
            log::debug!(
                "Bonus wave {} at {elapsed:.0}ms into level {}",
                state.bonus_waves_spawned,
                state.level
            );
            spawn_bonus_wave(state);
            state.show_message("BONUS WAVE!");
            state.events.push(GameEvent::BonusWave);
        } else {
            state.level += 1;
            state.speed_multiplier = 0.5 + state.level as f32 * 0.05;
            state.level_start_ms = now;
            state.bonus_waves_spawned = 0;
            state.is_leveling_up = true;
            state.next_wave_at_ms = now + LEVEL_UP_DELAY_MS;
            state.show_message(&format!("LEVEL {}", state.level));
            state.events.push(GameEvent::LevelUp { level: state.level });
        }
    }

    if state.is_leveling_up && now >= state.next_wave_at_ms {
        spawn_wave(state);
        state.is_leveling_up = false;
    }
}

/// Screen shake decay: amplitude shrinks 10% per frame with a random
/// per-frame offset, stopping below half a pixel or after 12 frames
fn update_shake(state: &mut GameState) {
    if !state.shake.active {
        return;
    }
    let amp = state.shake.amplitude;
    state.shake.offset = Vec2::new(
        state.rng.random_range(-amp..=amp),
        state.rng.random_range(-amp..=amp),
    );
    state.shake.amplitude *= 0.9;
    state.shake.frame_count += 1;
    if state.shake.amplitude < 0.5 || state.shake.frame_count > 12 {
        state.shake.active = false;
        state.shake.offset = Vec2::ZERO;
    }
}

/// Message fade: alpha steps down each tick and the message also dies at
/// its deadline, whichever comes first
fn update_message(state: &mut GameState) {
    if !state.message.active {
        return;
    }
    state.message.alpha = (state.message.alpha - 0.01).max(0.0);
    if state.message.alpha <= 0.0 || state.now_ms() > state.message.expires_at_ms {
        state.message.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::state::SizeClass;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_session(Difficulty::Normal);
        state
    }

    /// Run enough ticks to cover `ms` of simulated time
    fn run_ms(state: &mut GameState, input: &TickInput, ms: f64) {
        for _ in 0..(ms / MS_PER_TICK).ceil() as u64 {
            tick(state, input);
        }
    }

    #[test]
    fn test_tick_advances_clock_only_while_playing() {
        let mut state = GameState::new(42);
        let idle = TickInput::default();
        tick(&mut state, &idle); // Menu
        assert_eq!(state.time_ticks, 0);

        state.start_session(Difficulty::Normal);
        tick(&mut state, &idle);
        assert_eq!(state.time_ticks, 1);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &idle);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut state = playing_state();
        let idle = TickInput::default();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen_ticks = state.time_ticks;
        let frozen_ship = state.ship.pos;

        state.ship.vel = Vec2::new(3.0, 0.0);
        tick(&mut state, &idle);
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.ship.pos, frozen_ship);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_cleared_field_triggers_bonus_wave() {
        // Early clear (< 90s into the level): bonus wave, not a level up
        let mut state = playing_state();
        state.asteroids.clear();
        tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 1);
        assert_eq!(state.bonus_waves_spawned, 1);
        assert_eq!(state.asteroids.len(), BONUS_WAVE_SIZE as usize);
        assert!(state.message.active);
        assert_eq!(state.message.text, "BONUS WAVE!");
        assert!(state.events.contains(&GameEvent::BonusWave));
        for a in &state.asteroids {
            assert_eq!(a.size, SizeClass::Large);
            assert_eq!(a.tier, 0);
        }
    }

    #[test]
    fn test_bonus_waves_capped_then_level_up() {
        let mut state = playing_state();
        let idle = TickInput::default();
        state.asteroids.clear();
        tick(&mut state, &idle);
        state.asteroids.clear();
        tick(&mut state, &idle);
        assert_eq!(state.bonus_waves_spawned, MAX_BONUS_WAVES);
        assert_eq!(state.level, 1);

        // Third clear: bonus budget spent, level advances instead
        state.asteroids.clear();
        tick(&mut state, &idle);
        assert_eq!(state.level, 2);
        assert!(state.is_leveling_up);
        assert_eq!(state.bonus_waves_spawned, 0);
        assert!((state.speed_multiplier - 0.6).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_long_level_advances_without_bonus() {
        let mut state = playing_state();
        state.level_start_ms = -(MIN_LEVEL_TIME_MS + 1.0);
        state.asteroids.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.bonus_waves_spawned, 0);
    }

    #[test]
    fn test_next_wave_spawns_after_delay() {
        let mut state = playing_state();
        let idle = TickInput::default();
        state.level_start_ms = -(MIN_LEVEL_TIME_MS + 1.0);
        state.asteroids.clear();
        tick(&mut state, &idle);
        assert!(state.is_leveling_up);
        assert!(state.asteroids.is_empty(), "wave is delayed, not immediate");

        // Field stays empty during the delay without re-triggering
        run_ms(&mut state, &idle, LEVEL_UP_DELAY_MS / 2.0);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.level, 2);

        run_ms(&mut state, &idle, LEVEL_UP_DELAY_MS / 2.0 + 100.0);
        assert!(!state.is_leveling_up);
        // Level 2 wave: min(3 + 2, 12)
        assert_eq!(state.asteroids.len(), 5);
    }

    #[test]
    fn test_shake_decays_and_stops() {
        let mut state = playing_state();
        state.trigger_shake();
        let idle = TickInput::default();
        let mut prev = state.shake.amplitude;
        let mut frames = 0;
        while state.shake.active && frames < 20 {
            tick(&mut state, &idle);
            if state.shake.active {
                assert!(state.shake.amplitude < prev);
                prev = state.shake.amplitude;
            }
            frames += 1;
        }
        assert!(!state.shake.active);
        assert!(frames <= 13, "shake must stop within 12 frames, took {frames}");
        assert_eq!(state.shake.offset, Vec2::ZERO);
    }

    #[test]
    fn test_message_expires_by_deadline() {
        let mut state = playing_state();
        state.show_message("BONUS WAVE!");
        run_ms(&mut state, &TickInput::default(), MESSAGE_TTL_MS + 100.0);
        assert!(!state.message.active);
    }

    #[test]
    fn test_thrust_particles_only_when_accelerating() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.particles.active_count(), 0);

        let thrust = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &thrust);
        let count = state.particles.active_count();
        assert!((2..=3).contains(&count), "got {count} exhaust particles");
    }

    #[test]
    fn test_deterministic_replay() {
        // Same seed, same input sequence: bit-identical outcomes
        let mut a = GameState::new(777);
        let mut b = GameState::new(777);
        a.start_session(Difficulty::Hard);
        b.start_session(Difficulty::Hard);

        let input = TickInput {
            up: true,
            right: true,
            firing: true,
            pointer: Some(Vec2::new(650.0, 120.0)),
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.ship.health, b.ship.health);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        for (x, y) in a.asteroids.iter().zip(b.asteroids.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.hp, y.hp);
        }
    }

    #[test]
    fn test_session_smoke_run() {
        // A ten-second idle-ish session should never panic and should keep
        // every entity inside the wrap bounds
        let mut state = playing_state();
        let input = TickInput {
            firing: true,
            pointer: Some(Vec2::new(0.0, 0.0)),
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input);
            assert!((0.0..=FIELD_WIDTH).contains(&state.ship.pos.x));
            assert!((0.0..=FIELD_HEIGHT).contains(&state.ship.pos.y));
            for a in &state.asteroids {
                assert!((0.0..=FIELD_WIDTH).contains(&a.pos.x));
                assert!((0.0..=FIELD_HEIGHT).contains(&a.pos.y));
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
