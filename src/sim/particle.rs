//! Molecule entities
//!
//! A particle is a point mass with one of two shapes. Geometry is matched on
//! the shape; there is no dynamic dispatch or downcasting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{aabb_aabb_overlap, circle_aabb_overlap, circle_circle_overlap};

/// Shape family, used to pick a reaction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Round,
    Square,
}

/// Shape with its size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle of the given radius
    Round { radius: f32 },
    /// Axis-aligned square of the given edge length
    Square { edge: f32 },
}

/// A molecule in the reactor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Always > 0
    pub mass: f32,
    pub shape: Shape,
}

impl Particle {
    pub fn round(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            pos,
            vel,
            mass,
            shape: Shape::Round { radius },
        }
    }

    pub fn square(pos: Vec2, vel: Vec2, edge: f32, mass: f32) -> Self {
        Self {
            pos,
            vel,
            mass,
            shape: Shape::Square { edge },
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        match self.shape {
            Shape::Round { .. } => Variant::Round,
            Shape::Square { .. } => Variant::Square,
        }
    }

    #[inline]
    pub fn is_round(&self) -> bool {
        self.variant() == Variant::Round
    }

    /// Bounding box size (diameter x diameter, or edge x edge)
    #[inline]
    pub fn extent(&self) -> Vec2 {
        match self.shape {
            Shape::Round { radius } => Vec2::splat(radius * 2.0),
            Shape::Square { edge } => Vec2::splat(edge),
        }
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.extent() * 0.5
    }

    /// Explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    /// 1/2 m |v|^2
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Overlap test against another particle. Touching counts as colliding.
    ///
    /// Symmetric: square-vs-round reuses the round-vs-square routine with the
    /// arguments swapped.
    pub fn collides_with(&self, other: &Particle) -> bool {
        match (self.shape, other.shape) {
            (Shape::Round { radius: r1 }, Shape::Round { radius: r2 }) => {
                circle_circle_overlap(self.pos, r1, other.pos, r2)
            }
            (Shape::Round { radius }, Shape::Square { edge }) => {
                circle_aabb_overlap(self.pos, radius, other.pos, Vec2::splat(edge * 0.5))
            }
            (Shape::Square { .. }, Shape::Round { .. }) => other.collides_with(self),
            (Shape::Square { edge: e1 }, Shape::Square { edge: e2 }) => aabb_aabb_overlap(
                self.pos,
                Vec2::splat(e1 * 0.5),
                other.pos,
                Vec2::splat(e2 * 0.5),
            ),
        }
    }
}
