//! Combat and pickup resolution
//!
//! One pass per tick over every interacting entity pair: ship/asteroid,
//! bullet/asteroid, ship/pickup. Also owns firing cadence, powerup and
//! pickup expiry, spawner timers and combo scoring. Removal is resolved
//! within the same pass, so a destroyed asteroid never survives the tick
//! that killed it.

use glam::Vec2;
use rand::Rng;

use super::asteroid::split_asteroid;
use super::collision::circles_overlap;
use super::state::{
    Bullet, GameEvent, GamePhase, GameState, HealthPickup, PowerupKind, WeaponPickup,
};
use super::tick::TickInput;
use crate::consts::*;

/// Award points with the combo rule: a kill within the combo window of
/// the previous one scores ×1.5, floored.
pub fn award_points(state: &mut GameState, base: u64) {
    let now = state.now_ms();
    let points = if now - state.last_kill_ms < COMBO_WINDOW_MS {
        state.combo_active = true;
        (base as f32 * COMBO_MULTIPLIER).floor() as u64
    } else {
        state.combo_active = false;
        base
    };
    state.score += points;
    state.last_kill_ms = now;
}

/// Fire on the shooting cadence: difficulty interval, halved by rapidFire;
/// tripleShot fires a 3-bullet spread at -15°/0°/+15°.
pub fn update_shooting(state: &mut GameState, input: &TickInput) {
    if !input.firing {
        return;
    }

    let interval = if state.ship.powerups.is_active(PowerupKind::RapidFire) {
        state.shoot_interval_ms / 2.0
    } else {
        state.shoot_interval_ms
    };
    let now = state.now_ms();
    if now - state.last_shot_ms <= interval {
        return;
    }
    state.last_shot_ms = now;

    // Aim at the pointer when present, otherwise straight ahead
    let ship = &state.ship;
    let target = input
        .pointer
        .unwrap_or_else(|| ship.pos + Vec2::from_angle(ship.facing) * 100.0);
    let to_target = target - ship.pos;
    let base_angle = if to_target.length_squared() > f32::EPSILON {
        to_target.y.atan2(to_target.x)
    } else {
        ship.facing
    };

    let spread = 15.0_f32.to_radians();
    let triple = [-spread, 0.0, spread];
    let single = [0.0];
    let offsets: &[f32] = if ship.powerups.is_active(PowerupKind::TripleShot) {
        &triple
    } else {
        &single
    };
    let nose = ship.pos + Vec2::from_angle(ship.facing) * SHIP_NOSE_OFFSET;
    for &offset in offsets {
        state.bullets.push(Bullet {
            pos: nose,
            vel: Vec2::from_angle(base_angle + offset) * BULLET_SPEED,
            damage: BULLET_DAMAGE,
            distance_traveled: 0.0,
            radius: BULLET_RADIUS,
        });
    }
    state.events.push(GameEvent::Shoot);
}

/// Ship vs asteroid contact. Skipped entirely while invulnerable; the
/// first contact grants 60 ticks of invulnerability, so at most one hit
/// lands per pass.
fn resolve_ship_asteroid(state: &mut GameState) {
    if state.ship.invulnerable {
        return;
    }
    let hit = state
        .asteroids
        .iter()
        .find(|a| circles_overlap(state.ship.pos, state.ship.radius, a.pos, a.radius))
        .map(|a| (a.pos, a.damage, a.tier));

    let Some((pos, damage, tier)) = hit else {
        return;
    };

    state.ship.health -= damage;
    state.ship.invulnerable = true;
    state.ship.invulnerable_ticks = INVULNERABLE_TICKS;
    state.trigger_shake();
    state.particles.burst(pos, 10, &mut state.rng);
    state.events.push(GameEvent::ShipImpact { tier });

    if state.ship.health <= 0.0 {
        log::info!(
            "Game over: score {}, level {}",
            state.score,
            state.level
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
    }
}

/// Bullet vs asteroid. A hit consumes the bullet; the asteroid survives
/// while hit points remain, otherwise it is destroyed, scored and
/// replaced by its split result within this same pass.
fn resolve_bullets_asteroids(state: &mut GameState) {
    let mut b = 0;
    'bullets: while b < state.bullets.len() {
        for a in 0..state.asteroids.len() {
            let bullet = &state.bullets[b];
            let asteroid = &state.asteroids[a];
            if !circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius) {
                continue;
            }

            let damage = bullet.damage;
            state.bullets.remove(b);

            let asteroid = &mut state.asteroids[a];
            asteroid.hp -= damage;
            let tier = asteroid.tier;
            state.events.push(GameEvent::AsteroidHit { tier });

            if state.asteroids[a].hp > 0.0 {
                // Survives: small hit burst, bullet consumed, no split
                let pos = state.asteroids[a].pos;
                state.particles.burst(pos, 5, &mut state.rng);
            } else {
                let parent = state.asteroids.remove(a);
                award_points(state, parent.size.points());
                state
                    .particles
                    .burst(parent.pos, parent.size.burst_count(), &mut state.rng);
                state.events.push(GameEvent::AsteroidDestroyed { size: parent.size });
                let children = split_asteroid(&parent, &mut state.rng);
                state.asteroids.extend(children);
            }
            continue 'bullets;
        }
        b += 1;
    }
}

/// Ship vs weapon pickups: touching one activates the matching powerup
/// slot for 20 seconds and removes the pickup.
fn resolve_weapon_pickups(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let now = state.now_ms();

    let mut collected = Vec::new();
    state.weapon_pickups.retain(|pickup| {
        if circles_overlap(ship_pos, ship_radius, pickup.pos, pickup.radius) {
            collected.push(pickup.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        let slot = state.ship.powerups.slot_mut(kind);
        slot.active = true;
        slot.expires_at_ms = now + POWERUP_DURATION_MS;
        state.events.push(GameEvent::PowerupCollected(kind));
    }
}

/// Ship vs health pickups. Heals a difficulty-scaled fraction of missing
/// health, never topping off completely: health is capped at
/// max_health - 0.1. A pickup touched at (near-)full health is ignored.
fn resolve_health_pickups(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;

    let mut healed: Option<u32> = None;
    let ship = &mut state.ship;
    let heal_factor = state.heal_factor;
    state.health_pickups.retain(|pickup| {
        if healed.is_some()
            || !circles_overlap(ship_pos, ship_radius, pickup.pos, pickup.radius)
        {
            return true;
        }
        let missing = ship.max_health - ship.health;
        if missing <= 0.1 {
            return true;
        }
        let amount = ((missing * heal_factor).floor()).max(1.0);
        ship.health += amount;
        if ship.health >= ship.max_health {
            ship.health = ship.max_health - 0.1;
        }
        healed = Some(amount as u32);
        false
    });

    if let Some(amount) = healed {
        state.show_message(&format!("+{amount} HP"));
        state.events.push(GameEvent::Healed { amount });
    }
}

/// Full collision/resolution pass, fixed order
pub fn resolve_collisions(state: &mut GameState) {
    resolve_ship_asteroid(state);
    resolve_bullets_asteroids(state);
    resolve_weapon_pickups(state);
    resolve_health_pickups(state);
}

/// Powerup expiry, pickup self-expiry and spawner cadence. All delayed
/// actions are deadline timestamps checked here every tick.
pub fn update_pickups(state: &mut GameState) {
    let now = state.now_ms();

    // Active powerups expire by deadline
    for kind in [PowerupKind::TripleShot, PowerupKind::RapidFire] {
        let slot = state.ship.powerups.slot_mut(kind);
        if slot.active && now > slot.expires_at_ms {
            slot.active = false;
        }
    }

    // Unclaimed pickups expire on their own timers
    state.weapon_pickups.retain(|w| now <= w.expires_at_ms);
    state.health_pickups.retain(|h| now <= h.expires_at_ms);

    // A weapon pickup spawns when none exists and the timer has elapsed
    if state.weapon_pickups.is_empty() && now > state.next_weapon_spawn_ms {
        let pos = interior_point(state);
        let kind = if state.rng.random_bool(0.5) {
            PowerupKind::TripleShot
        } else {
            PowerupKind::RapidFire
        };
        state.weapon_pickups.push(WeaponPickup {
            pos,
            kind,
            expires_at_ms: now + WEAPON_PICKUP_TTL_MS,
            radius: WEAPON_PICKUP_RADIUS,
        });
        state.next_weapon_spawn_ms = now + WEAPON_SPAWN_INTERVAL_MS;
    }

    // Health pickups respawn on their own cadence, independent of whether
    // the previous one was collected or expired
    if now > state.next_health_spawn_ms {
        let pos = interior_point(state);
        let pulse_phase = state.rng.random_range(0.0..std::f32::consts::TAU);
        state.health_pickups.push(HealthPickup {
            pos,
            expires_at_ms: now + HEALTH_PICKUP_TTL_MS,
            radius: HEALTH_PICKUP_RADIUS,
            pulse_phase,
        });
        state.next_health_spawn_ms =
            now + HEALTH_SPAWN_MIN_MS + state.rng.random_range(0.0..HEALTH_SPAWN_JITTER_MS);
    }
}

/// Random interior point away from the playfield edges
fn interior_point(state: &mut GameState) -> Vec2 {
    Vec2::new(
        state
            .rng
            .random_range(PICKUP_SPAWN_MARGIN..FIELD_WIDTH - PICKUP_SPAWN_MARGIN),
        state
            .rng
            .random_range(PICKUP_SPAWN_MARGIN..FIELD_HEIGHT - PICKUP_SPAWN_MARGIN),
    )
}
