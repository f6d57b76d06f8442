//! Asteroid lifecycle: wave spawning, material tiers, splitting
//!
//! Waves place large asteroids along the playfield edges, outside a safe
//! radius around the ship. Each asteroid carries a material tier that
//! multiplies its hit points, drift speed and contact damage.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{material, Asteroid, GameState, SizeClass};
use crate::consts::*;

/// Base hit points of a large asteroid before the tier multiplier
const BASE_LARGE_HP: f32 = 1.0;
/// Base contact damage of a large asteroid before the tier multiplier
const BASE_LARGE_DAMAGE: f32 = 2.0;

/// Procedurally generate an irregular polygon outline: 8-12 vertices at
/// radius ±20%. Generated once per asteroid and fixed for its lifetime.
pub fn generate_outline(radius: f32, rng: &mut Pcg32) -> Vec<Vec2> {
    let vertex_count = rng.random_range(8..=12u32);
    (0..vertex_count)
        .map(|i| {
            let angle = (i as f32 / vertex_count as f32) * std::f32::consts::TAU;
            let r = radius * rng.random_range(0.8..1.2);
            Vec2::from_angle(angle) * r
        })
        .collect()
}

/// Random point on one of the four playfield edges
fn edge_point(rng: &mut Pcg32) -> Vec2 {
    match rng.random_range(0..4u32) {
        0 => Vec2::new(rng.random_range(0.0..FIELD_WIDTH), 0.0),
        1 => Vec2::new(FIELD_WIDTH, rng.random_range(0.0..FIELD_HEIGHT)),
        2 => Vec2::new(rng.random_range(0.0..FIELD_WIDTH), FIELD_HEIGHT),
        _ => Vec2::new(0.0, rng.random_range(0.0..FIELD_HEIGHT)),
    }
}

/// Sample an edge point outside the ship's safe radius. Retries up to the
/// attempt budget, then accepts the last candidate rather than failing.
fn safe_spawn_point(ship_pos: Vec2, rng: &mut Pcg32) -> Vec2 {
    let mut point = edge_point(rng);
    for _ in 1..SPAWN_ATTEMPTS {
        if ship_pos.distance(point) > SAFE_SPAWN_DISTANCE {
            break;
        }
        point = edge_point(rng);
    }
    point
}

/// Level-gated weighted material draw. The maximum unlockable tier is
/// floor(level/5) capped at 4; the newest unlocked tier draws at 25% and
/// the remaining 75% splits evenly among the older tiers.
pub fn random_material_tier(level: u32, rng: &mut Pcg32) -> u8 {
    let max_tier = (level / 5).min(4);
    if max_tier == 0 {
        return 0;
    }

    let roll: f32 = rng.random();
    let older_weight = 0.75 / max_tier as f32;
    let mut cumulative = 0.0;
    for tier in 0..=max_tier {
        cumulative += if tier == max_tier { 0.25 } else { older_weight };
        if roll < cumulative {
            return tier as u8;
        }
    }
    0
}

/// Build one large asteroid of the given tier at a safe edge point
fn spawn_large(state: &mut GameState, tier: u8) {
    let ship_pos = state.ship.pos;
    let pos = safe_spawn_point(ship_pos, &mut state.rng);
    let mat = material(tier);

    let heading = state.rng.random_range(0.0..std::f32::consts::TAU);
    let speed = state.rng.random_range(0.5..1.5) * mat.speed_mult;
    let rotation = state.rng.random_range(0.0..std::f32::consts::TAU);
    let rotation_speed = state.rng.random_range(0.01..0.03);
    let outline = generate_outline(ASTEROID_RADIUS_LARGE, &mut state.rng);

    state.asteroids.push(Asteroid {
        pos,
        vel: Vec2::from_angle(heading) * speed,
        rotation,
        rotation_speed,
        size: SizeClass::Large,
        radius: ASTEROID_RADIUS_LARGE,
        outline,
        hp: BASE_LARGE_HP * mat.hp_mult,
        max_hp: BASE_LARGE_HP * mat.hp_mult,
        tier,
        damage: BASE_LARGE_DAMAGE * mat.damage_mult,
    });
}

/// Spawn the level wave: min(3 + level, cap) asteroids with level-gated
/// material tiers
pub fn spawn_wave(state: &mut GameState) {
    let count = (3 + state.level).min(WAVE_CAP);
    log::debug!("Spawning wave of {count} for level {}", state.level);
    for _ in 0..count {
        let tier = random_material_tier(state.level, &mut state.rng);
        spawn_large(state, tier);
    }
}

/// Spawn a 4-asteroid bonus wave. Bonus asteroids are Rock tier.
pub fn spawn_bonus_wave(state: &mut GameState) {
    for _ in 0..BONUS_WAVE_SIZE {
        spawn_large(state, 0);
    }
}

/// Split a destroyed asteroid into child fragments. Large yields 2 medium,
/// medium yields 2 small, small is terminal. Children keep the parent's
/// material tier for identity, take a fixed per-size contact damage scaled
/// by the tier multiplier, and die to a single hit.
pub fn split_asteroid(parent: &Asteroid, rng: &mut Pcg32) -> Vec<Asteroid> {
    let Some(child_size) = parent.size.split() else {
        return Vec::new();
    };

    let child_radius = child_size.radius();
    let child_damage = child_size.child_contact_damage() * material(parent.tier).damage_mult;
    let divergence = 120.0_f32.to_radians();

    [divergence, -divergence]
        .into_iter()
        .map(|angle| Asteroid {
            pos: parent.pos,
            vel: parent.vel * 0.5 + Vec2::from_angle(angle) * 2.0,
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            rotation_speed: parent.rotation_speed * 1.5,
            size: child_size,
            radius: child_radius,
            outline: generate_outline(child_radius, rng),
            hp: 1.0,
            max_hp: 1.0,
            tier: parent.tier,
            damage: child_damage,
        })
        .collect()
}
