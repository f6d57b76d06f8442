//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`]
//! aggregate passed explicitly to every update function each tick; no
//! module-level singletons. Renderers and audio observe it read-only and
//! drain the per-tick event queue.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::ParticlePool;
use crate::consts::*;
use crate::settings::Difficulty;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Difficulty select; no simulation runs
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-session
    Paused,
    /// Session ended (ship destroyed); only a restart leaves this state
    GameOver,
}

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub fn radius(&self) -> f32 {
        match self {
            SizeClass::Large => ASTEROID_RADIUS_LARGE,
            SizeClass::Medium => ASTEROID_RADIUS_MEDIUM,
            SizeClass::Small => ASTEROID_RADIUS_SMALL,
        }
    }

    /// Points awarded on destruction. Smaller fragments are worth more.
    pub fn points(&self) -> u64 {
        match self {
            SizeClass::Large => 20,
            SizeClass::Medium => 50,
            SizeClass::Small => 100,
        }
    }

    /// Explosion burst size on destruction
    pub fn burst_count(&self) -> u32 {
        match self {
            SizeClass::Large => 25,
            SizeClass::Medium => 20,
            SizeClass::Small => 15,
        }
    }

    /// What this size splits into; small asteroids are terminal
    pub fn split(&self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }

    /// Base contact damage for split children of this size
    pub fn child_contact_damage(&self) -> f32 {
        match self {
            SizeClass::Large => 2.0,
            SizeClass::Medium => 1.0,
            SizeClass::Small => 0.5,
        }
    }
}

/// Asteroid material profile; tier index doubles as hit-feedback identity
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub name: &'static str,
    pub hp_mult: f32,
    pub speed_mult: f32,
    pub damage_mult: f32,
}

/// Tiers 0..=4, Rock through Tungsten. Harder tiers are slower but
/// tougher and hit harder.
pub const MATERIALS: [Material; 5] = [
    Material { name: "Rock", hp_mult: 1.0, speed_mult: 1.0, damage_mult: 1.0 },
    Material { name: "Iron", hp_mult: 3.0, speed_mult: 0.8, damage_mult: 1.5 },
    Material { name: "Steel", hp_mult: 5.0, speed_mult: 0.6, damage_mult: 2.0 },
    Material { name: "Titanium", hp_mult: 8.0, speed_mult: 0.5, damage_mult: 2.5 },
    Material { name: "Tungsten", hp_mult: 12.0, speed_mult: 0.4, damage_mult: 3.0 },
];

pub fn material(tier: u8) -> &'static Material {
    &MATERIALS[(tier as usize).min(MATERIALS.len() - 1)]
}

/// Timed ship buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    TripleShot,
    RapidFire,
}

/// One powerup slot; at most one active instance per kind by construction
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerupSlot {
    pub active: bool,
    pub expires_at_ms: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Powerups {
    pub triple_shot: PowerupSlot,
    pub rapid_fire: PowerupSlot,
}

impl Powerups {
    pub fn slot_mut(&mut self, kind: PowerupKind) -> &mut PowerupSlot {
        match kind {
            PowerupKind::TripleShot => &mut self.triple_shot,
            PowerupKind::RapidFire => &mut self.rapid_fire,
        }
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        match kind {
            PowerupKind::TripleShot => self.triple_shot.active,
            PowerupKind::RapidFire => self.rapid_fire.active,
        }
    }
}

/// The player's ship. One instance, owned by the session.
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in radians, lerped toward the aim target
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub powerups: Powerups,
    pub invulnerable: bool,
    /// Remaining invulnerability, decremented each tick while active
    pub invulnerable_ticks: u32,
    pub radius: f32,
}

impl Ship {
    fn new(max_health: f32) -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            facing: 0.0,
            health: max_health,
            max_health,
            powerups: Powerups::default(),
            invulnerable: false,
            invulnerable_ticks: 0,
            radius: SHIP_RADIUS,
        }
    }
}

/// A breakable asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub size: SizeClass,
    pub radius: f32,
    /// Irregular polygon offsets, generated once per asteroid
    pub outline: Vec<Vec2>,
    pub hp: f32,
    pub max_hp: f32,
    /// Material tier 0..=4
    pub tier: u8,
    /// Damage dealt to the ship on contact
    pub damage: f32,
}

/// A fired projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub distance_traveled: f32,
    pub radius: f32,
}

/// A timed weapon powerup pickup
#[derive(Debug, Clone)]
pub struct WeaponPickup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub expires_at_ms: f64,
    pub radius: f32,
}

/// A timed health pickup
#[derive(Debug, Clone)]
pub struct HealthPickup {
    pub pos: Vec2,
    pub expires_at_ms: f64,
    pub radius: f32,
    /// Cosmetic pulse animation phase
    pub pulse_phase: f32,
}

/// Background star (parallax layer 1..=3; deeper layers scroll faster)
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub layer: u8,
}

/// Screen shake driven by ship impacts; decays over at most 12 frames
#[derive(Debug, Clone, Default)]
pub struct ScreenShake {
    pub active: bool,
    pub amplitude: f32,
    pub frame_count: u32,
    pub offset: Vec2,
}

/// Transient center-screen message ("BONUS WAVE!", "+N HP")
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub active: bool,
    pub text: String,
    pub alpha: f32,
    pub expires_at_ms: f64,
}

/// Fire-and-forget notifications for audio/feedback observers. The core
/// never consults a return value; observers drain these once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Shoot,
    /// Bullet struck an asteroid (lethal or not); tier selects the sound
    AsteroidHit { tier: u8 },
    AsteroidDestroyed { size: SizeClass },
    /// Asteroid struck the ship
    ShipImpact { tier: u8 },
    PowerupCollected(PowerupKind),
    Healed { amount: u32 },
    BonusWave,
    LevelUp { level: u32 },
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Single RNG stream for all session randomness
    pub rng: Pcg32,
    pub phase: GamePhase,

    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub weapon_pickups: Vec<WeaponPickup>,
    pub health_pickups: Vec<HealthPickup>,
    pub particles: ParticlePool,
    pub stars: Vec<Star>,

    pub score: u64,
    pub level: u32,
    /// Asteroid/starfield speed scale: 0.5 + level * 0.05
    pub speed_multiplier: f32,
    /// Simulation tick counter; the simulated clock derives from it
    pub time_ticks: u64,

    /// Timestamp of the previous kill, for the combo window
    pub last_kill_ms: f64,
    /// Cosmetic flag consumed by the display layer
    pub combo_active: bool,

    pub is_leveling_up: bool,
    /// Deadline for the delayed next-wave spawn while leveling up
    pub next_wave_at_ms: f64,
    pub level_start_ms: f64,
    pub bonus_waves_spawned: u32,

    pub message: Message,
    pub shake: ScreenShake,

    /// Timestamp of the last shot fired
    pub last_shot_ms: f64,
    /// Difficulty-selected firing cadence
    pub shoot_interval_ms: f64,
    /// Difficulty-selected heal fraction
    pub heal_factor: f32,

    pub next_weapon_spawn_ms: f64,
    pub next_health_spawn_ms: f64,

    /// Events accumulated this tick; drained by observers
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session shell in the menu phase
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = generate_starfield(&mut rng);
        let preset = Difficulty::Normal.preset();
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            ship: Ship::new(preset.start_health),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            weapon_pickups: Vec::new(),
            health_pickups: Vec::new(),
            particles: ParticlePool::new(),
            stars,
            score: 0,
            level: 1,
            speed_multiplier: preset.speed_multiplier,
            time_ticks: 0,
            last_kill_ms: f64::NEG_INFINITY,
            combo_active: false,
            is_leveling_up: false,
            next_wave_at_ms: 0.0,
            level_start_ms: 0.0,
            bonus_waves_spawned: 0,
            message: Message::default(),
            shake: ScreenShake::default(),
            last_shot_ms: f64::NEG_INFINITY,
            shoot_interval_ms: preset.shoot_interval_ms,
            heal_factor: preset.heal_factor,
            next_weapon_spawn_ms: 0.0,
            next_health_spawn_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Simulated clock in milliseconds
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * MS_PER_TICK
    }

    /// Menu → Playing: apply the difficulty preset, reset the session and
    /// spawn the first wave. The preset is immutable until the next start.
    pub fn start_session(&mut self, difficulty: Difficulty) {
        let preset = difficulty.preset();
        log::info!(
            "Session start: {} (seed {})",
            preset.label,
            self.seed
        );

        self.ship = Ship::new(preset.start_health);
        self.speed_multiplier = preset.speed_multiplier;
        self.shoot_interval_ms = preset.shoot_interval_ms;
        self.heal_factor = preset.heal_factor;

        self.asteroids.clear();
        self.bullets.clear();
        self.weapon_pickups.clear();
        self.health_pickups.clear();
        self.particles = ParticlePool::new();

        self.score = 0;
        self.level = 1;
        self.last_kill_ms = f64::NEG_INFINITY;
        self.combo_active = false;
        self.is_leveling_up = false;
        self.level_start_ms = self.now_ms();
        self.bonus_waves_spawned = 0;
        self.message = Message::default();
        self.shake = ScreenShake::default();
        self.last_shot_ms = f64::NEG_INFINITY;
        self.next_weapon_spawn_ms = self.now_ms() + WEAPON_SPAWN_INTERVAL_MS;
        self.next_health_spawn_ms = self.now_ms() + HEALTH_SPAWN_MIN_MS;
        self.events.clear();

        self.phase = GamePhase::Playing;
        super::asteroid::spawn_wave(self);
    }

    /// Return to the menu, tearing down the session
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.asteroids.clear();
        self.bullets.clear();
        self.weapon_pickups.clear();
        self.health_pickups.clear();
        self.events.clear();
    }

    /// Show a transient center-screen message
    pub fn show_message(&mut self, text: &str) {
        self.message = Message {
            active: true,
            text: text.to_string(),
            alpha: 1.0,
            expires_at_ms: self.now_ms() + MESSAGE_TTL_MS,
        };
    }

    /// Kick off a screen shake
    pub fn trigger_shake(&mut self) {
        self.shake.active = true;
        self.shake.amplitude = 5.0;
        self.shake.frame_count = 0;
    }

    /// Hand the accumulated events to an observer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Three parallax layers: 50/100/150 stars at depths 1..=3
fn generate_starfield(rng: &mut Pcg32) -> Vec<Star> {
    let mut stars = Vec::with_capacity(300);
    for (count, layer) in [(50, 1u8), (100, 2), (150, 3)] {
        for _ in 0..count {
            stars.push(Star {
                pos: Vec2::new(
                    rng.random_range(0.0..FIELD_WIDTH),
                    rng.random_range(0.0..FIELD_HEIGHT),
                ),
                layer,
            });
        }
    }
    stars
}
