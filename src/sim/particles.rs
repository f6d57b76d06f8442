//! Fixed-capacity particle pool
//!
//! Particles are visual only and never gameplay-authoritative. The pool is
//! allocated once at session start; spawning finds the first inactive slot
//! and silently drops the request when the pool is exhausted.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::MAX_PARTICLES;

/// Particle lifetime in ticks; alpha fades linearly over this span
pub const PARTICLE_LIFETIME: u32 = 30;

/// Palette indices for renderers (explosion ember / flame / exhaust gas)
pub const COLOR_EMBER: u8 = 0;
pub const COLOR_FLAME: u8 = 1;
pub const COLOR_GAS: u8 = 2;

/// One pooled particle slot
#[derive(Debug, Clone)]
pub struct Particle {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime: u32,
    pub alpha: f32,
    pub color: u8,
}

impl Particle {
    fn inactive() -> Self {
        Self {
            active: false,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            lifetime: 0,
            alpha: 0.0,
            color: COLOR_EMBER,
        }
    }
}

/// Pool of `MAX_PARTICLES` slots; never grows
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            slots: vec![Particle::inactive(); MAX_PARTICLES],
        }
    }

    /// Read-only view for renderers
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    /// Claim the first inactive slot, or None when exhausted
    fn claim(&mut self) -> Option<&mut Particle> {
        self.slots.iter_mut().find(|p| !p.active)
    }

    /// Spawn one particle with explicit kinematics; dropped on exhaustion
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, lifetime: u32, alpha: f32, color: u8) {
        if let Some(slot) = self.claim() {
            slot.active = true;
            slot.pos = pos;
            slot.vel = vel;
            slot.lifetime = lifetime;
            slot.alpha = alpha;
            slot.color = color;
        }
    }

    /// Radial explosion burst: `count` embers at speed [2,5)
    pub fn burst(&mut self, pos: Vec2, count: u32, rng: &mut Pcg32) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(2.0..5.0);
            let color = if rng.random_bool(0.5) {
                COLOR_EMBER
            } else {
                COLOR_FLAME
            };
            self.spawn(
                pos,
                Vec2::from_angle(angle) * speed,
                PARTICLE_LIFETIME,
                1.0,
                color,
            );
        }
    }

    /// Advance all active slots one tick; expired slots return to the pool
    pub fn update(&mut self) {
        for p in self.slots.iter_mut().filter(|p| p.active) {
            p.pos += p.vel;
            p.lifetime = p.lifetime.saturating_sub(1);
            p.alpha = p.lifetime as f32 / PARTICLE_LIFETIME as f32;
            if p.lifetime == 0 {
                p.active = false;
            }
        }
    }
}
