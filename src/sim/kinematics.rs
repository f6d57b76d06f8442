//! Entity kinematics
//!
//! Position/velocity integration, screen wrapping and ship steering.
//! Asteroids and the starfield scale by the session speed multiplier;
//! the ship and bullets move unscaled.

use glam::Vec2;

use super::state::{Asteroid, Bullet, Ship, Star};
use super::tick::TickInput;
use crate::consts::*;
use crate::lerp_angle;

/// Teleport a coordinate that exits [0,width] or [0,height] to the
/// opposite edge. Wrap, not bounce.
#[inline]
pub fn wrap_position(pos: &mut Vec2, width: f32, height: f32) {
    if pos.x < 0.0 {
        pos.x = width;
    } else if pos.x > width {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = height;
    } else if pos.y > height {
        pos.y = 0.0;
    }
}

/// One tick of ship movement: input acceleration, speed clamp, inertia
/// decay, drift snap, integration, wrap, aim lerp, invulnerability timer.
pub fn update_ship(ship: &mut Ship, input: &TickInput) {
    // Directional input as constant acceleration
    if input.up {
        ship.vel.y -= SHIP_ACCEL;
    }
    if input.down {
        ship.vel.y += SHIP_ACCEL;
    }
    if input.left {
        ship.vel.x -= SHIP_ACCEL;
    }
    if input.right {
        ship.vel.x += SHIP_ACCEL;
    }
    if input.joystick != Vec2::ZERO {
        ship.vel += input.joystick * SHIP_ACCEL;
    }

    // Clamp to max speed magnitude
    let speed = ship.vel.length();
    if speed > SHIP_MAX_SPEED {
        ship.vel *= SHIP_MAX_SPEED / speed;
    }

    // Inertia decay toward rest, snapped to zero below the drift threshold
    ship.vel *= SHIP_VELOCITY_DECAY;
    if ship.vel.x.abs() < SHIP_STOP_THRESHOLD {
        ship.vel.x = 0.0;
    }
    if ship.vel.y.abs() < SHIP_STOP_THRESHOLD {
        ship.vel.y = 0.0;
    }

    ship.pos += ship.vel;
    wrap_position(&mut ship.pos, FIELD_WIDTH, FIELD_HEIGHT);

    // Aim: joystick direction wins, then pointer, else hold the current
    // facing (stable fallback for zero-length aim vectors)
    let target = if input.joystick != Vec2::ZERO {
        Some(input.joystick.y.atan2(input.joystick.x))
    } else if let Some(pointer) = input.pointer {
        let to_pointer = pointer - ship.pos;
        if to_pointer.length_squared() > f32::EPSILON {
            Some(to_pointer.y.atan2(to_pointer.x))
        } else {
            None
        }
    } else {
        None
    };
    if let Some(target) = target {
        ship.facing = lerp_angle(ship.facing, target, SHIP_TURN_LERP);
    }

    // Invulnerability countdown
    if ship.invulnerable {
        ship.invulnerable_ticks = ship.invulnerable_ticks.saturating_sub(1);
        if ship.invulnerable_ticks == 0 {
            ship.invulnerable = false;
        }
    }
}

/// Asteroid drift and spin, scaled by the session speed multiplier
pub fn update_asteroids(asteroids: &mut [Asteroid], speed_multiplier: f32) {
    for asteroid in asteroids {
        asteroid.pos += asteroid.vel * speed_multiplier;
        asteroid.rotation += asteroid.rotation_speed * speed_multiplier;
        wrap_position(&mut asteroid.pos, FIELD_WIDTH, FIELD_HEIGHT);
    }
}

/// Bullet flight; removes bullets past max range or outside the playfield
/// margin. Bullets do not wrap.
pub fn update_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut() {
        bullet.pos += bullet.vel;
        bullet.distance_traveled += bullet.vel.length();
    }
    bullets.retain(|b| {
        b.distance_traveled <= BULLET_MAX_RANGE
            && b.pos.x >= -BULLET_CULL_MARGIN
            && b.pos.x <= FIELD_WIDTH + BULLET_CULL_MARGIN
            && b.pos.y >= -BULLET_CULL_MARGIN
            && b.pos.y <= FIELD_HEIGHT + BULLET_CULL_MARGIN
    });
}

/// Parallax starfield scroll; deeper layers move faster
pub fn update_starfield(stars: &mut [Star], speed_multiplier: f32) {
    for star in stars {
        star.pos.y += 0.5 * star.layer as f32 * speed_multiplier;
        if star.pos.y > FIELD_HEIGHT {
            star.pos.y = 0.0;
        }
    }
}
