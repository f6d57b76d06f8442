//! Circle-circle collision detection
//!
//! Every pairwise interaction in the game (ship/asteroid, bullet/asteroid,
//! ship/pickup) reduces to one overlap test between bounding circles. Pure
//! function, O(1) per pair; at tens of entities no broad phase is needed.

use glam::Vec2;

/// Two circles collide iff the distance between centers is less than the
/// sum of their radii. Exact touching does not count.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let radii = a_radius + b_radius;
    a_pos.distance_squared(b_pos) < radii * radii
}
