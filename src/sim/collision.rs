//! Collision detection between molecules
//!
//! Pure geometry tests for the three shape pairings, plus the brute-force
//! pair scan that decides which molecules react this tick.

use glam::Vec2;

use super::particle::Particle;

/// Circle vs circle: center distance <= sum of radii
#[inline]
pub fn circle_circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Circle vs axis-aligned box, via the box point closest to the circle center
#[inline]
pub fn circle_aabb_overlap(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> bool {
    let closest = center.clamp(box_center - half, box_center + half);
    center.distance_squared(closest) <= radius * radius
}

/// Box vs box on closed intervals (shared edges overlap)
#[inline]
pub fn aabb_aabb_overlap(a: Vec2, half_a: Vec2, b: Vec2, half_b: Vec2) -> bool {
    !(a.x - half_a.x > b.x + half_b.x
        || a.x + half_a.x < b.x - half_b.x
        || a.y - half_a.y > b.y + half_b.y
        || a.y + half_a.y < b.y - half_b.y)
}

/// Find the colliding pairs for this tick.
///
/// Scans every `(i, j)` with `i < j`. Once `i` finds its first partner the
/// scan moves on to `i + 1`, so each particle leads at most one pair, though
/// it may still be the partner of several earlier particles. Pairs come out
/// in discovery order: ascending `i`, then ascending `j`.
pub fn detect_collisions(particles: &[Particle]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        if let Some(offset) = particles[i + 1..].iter().position(|b| a.collides_with(b)) {
            let j = i + 1 + offset;
            log::trace!("collision {} <-> {}", i, j);
            pairs.push((i, j));
        }
    }
    pairs
}
