//! Reactor rectangle and its interior

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Outer reactor rectangle plus wall thickness.
///
/// Molecules live in the interior: the rectangle shrunk by `wall_thickness`
/// on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
}

impl ReactorBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32, wall_thickness: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            wall_thickness,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.reactor_x,
            settings.reactor_y,
            settings.reactor_width,
            settings.reactor_height,
            settings.wall_thickness,
        )
    }

    /// Inner face of the left wall
    #[inline]
    pub fn inner_left(&self) -> f32 {
        self.x + self.wall_thickness
    }

    /// Inner face of the right wall
    #[inline]
    pub fn inner_right(&self) -> f32 {
        self.x + self.width - self.wall_thickness
    }

    /// Inner face of the top wall
    #[inline]
    pub fn inner_top(&self) -> f32 {
        self.y + self.wall_thickness
    }

    /// Inner face of the bottom wall
    #[inline]
    pub fn inner_bottom(&self) -> f32 {
        self.y + self.height - self.wall_thickness
    }

    #[inline]
    pub fn interior_min(&self) -> Vec2 {
        Vec2::new(self.inner_left(), self.inner_top())
    }

    #[inline]
    pub fn interior_max(&self) -> Vec2 {
        Vec2::new(self.inner_right(), self.inner_bottom())
    }

    #[inline]
    pub fn interior_size(&self) -> Vec2 {
        self.interior_max() - self.interior_min()
    }

    /// Whether a body with the given half-extent sits fully inside the interior
    pub fn contains(&self, center: Vec2, half: Vec2) -> bool {
        let lo = self.interior_min() + half;
        let hi = self.interior_max() - half;
        center.x >= lo.x && center.x <= hi.x && center.y >= lo.y && center.y <= hi.y
    }

    /// Change the outer width. Non-positive or non-finite widths are ignored.
    ///
    /// Returns whether the width changed.
    pub fn resize(&mut self, new_width: f32) -> bool {
        if !new_width.is_finite() || new_width <= 0.0 {
            log::warn!("Ignoring reactor resize to {}", new_width);
            return false;
        }
        self.width = new_width;
        true
    }
}

impl Default for ReactorBounds {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
