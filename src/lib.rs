//! Space Hunter - an asteroid-survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (kinematics, collisions, game state)
//! - `settings`: Difficulty presets and preferences
//! - `highscores`: Top-5 leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (60 Hz; velocities are in pixels per tick)
    pub const TICK_HZ: u32 = 60;
    /// Simulated milliseconds per tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_HZ as f64;
    /// Clamp for a single wall-clock frame before feeding the accumulator,
    /// so one slow frame cannot tunnel entities through thin colliders
    pub const MAX_FRAME_MS: f64 = 33.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship tuning
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_ACCEL: f32 = 0.5;
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const SHIP_VELOCITY_DECAY: f32 = 0.95;
    /// Velocity components below this snap to zero to prevent drift
    pub const SHIP_STOP_THRESHOLD: f32 = 0.1;
    /// Facing angle blend factor per tick (turning delay, not a snap)
    pub const SHIP_TURN_LERP: f32 = 0.15;
    /// Ticks of invulnerability after taking a hit
    pub const INVULNERABLE_TICKS: u32 = 60;
    /// Bullet muzzle offset from ship center, along facing
    pub const SHIP_NOSE_OFFSET: f32 = 18.0;

    /// Bullet tuning
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_DAMAGE: f32 = 1.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_MAX_RANGE: f32 = 800.0;
    /// Bullets are culled this far outside the playfield
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    /// Asteroid radii by size class
    pub const ASTEROID_RADIUS_LARGE: f32 = 50.0;
    pub const ASTEROID_RADIUS_MEDIUM: f32 = 25.0;
    pub const ASTEROID_RADIUS_SMALL: f32 = 12.0;
    /// Wave spawns are rejected within this distance of the ship
    pub const SAFE_SPAWN_DISTANCE: f32 = 200.0;
    /// Retry budget for the safe-spawn search
    pub const SPAWN_ATTEMPTS: u32 = 20;
    /// Wave size cap: min(3 + level, cap)
    pub const WAVE_CAP: u32 = 12;
    pub const BONUS_WAVE_SIZE: u32 = 4;

    /// Pickup tuning (milliseconds are simulated-clock deadlines)
    pub const POWERUP_DURATION_MS: f64 = 20_000.0;
    pub const WEAPON_PICKUP_TTL_MS: f64 = 10_000.0;
    pub const WEAPON_SPAWN_INTERVAL_MS: f64 = 15_000.0;
    pub const HEALTH_PICKUP_TTL_MS: f64 = 15_000.0;
    pub const HEALTH_SPAWN_MIN_MS: f64 = 30_000.0;
    pub const HEALTH_SPAWN_JITTER_MS: f64 = 10_000.0;
    pub const WEAPON_PICKUP_RADIUS: f32 = 20.0;
    pub const HEALTH_PICKUP_RADIUS: f32 = 15.0;
    /// Pickups spawn at interior points at least this far from the edges
    pub const PICKUP_SPAWN_MARGIN: f32 = 100.0;

    /// Scoring
    pub const COMBO_WINDOW_MS: f64 = 2_000.0;
    pub const COMBO_MULTIPLIER: f32 = 1.5;

    /// Progression
    pub const MIN_LEVEL_TIME_MS: f64 = 90_000.0;
    pub const MAX_BONUS_WAVES: u32 = 2;
    pub const LEVEL_UP_DELAY_MS: f64 = 5_000.0;

    /// Transient message lifetime
    pub const MESSAGE_TTL_MS: f64 = 2_000.0;

    /// Particle pool capacity (spawn requests beyond this are dropped)
    pub const MAX_PARTICLES: usize = 300;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Blend `current` toward `target` along the shortest arc
#[inline]
pub fn lerp_angle(current: f32, target: f32, alpha: f32) -> f32 {
    let diff = normalize_angle(target - current);
    current + diff * alpha
}
