//! Wall physics
//!
//! Molecules bounce off the four inner wall faces. The left wall is a heater:
//! on bounce both velocity components are scaled by its temperature. The right
//! wall counts impacts per one-second window, which reads as pressure.

use serde::{Deserialize, Serialize};

use super::bounds::ReactorBounds;
use super::particle::Particle;
use crate::consts::{HIT_WINDOW_SECS, MAX_TEMPERATURE, MIN_TEMPERATURE, TEMPERATURE_STEP};

/// Which walls a particle touched during one reflection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Heater dial and right-wall impact counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallState {
    /// Left wall velocity multiplier, within [MIN_TEMPERATURE, MAX_TEMPERATURE]
    left_temperature: f32,
    /// Right wall hits in the current window
    right_hits: u32,
    /// Right wall hits in the last completed window
    last_window_hits: u32,
    /// Seconds since the window last reset
    window_timer: f32,
}

impl Default for WallState {
    fn default() -> Self {
        Self {
            left_temperature: 1.0,
            right_hits: 0,
            last_window_hits: 0,
            window_timer: 0.0,
        }
    }
}

impl WallState {
    pub fn left_temperature(&self) -> f32 {
        self.left_temperature
    }

    pub fn right_hits(&self) -> u32 {
        self.right_hits
    }

    pub fn last_window_hits(&self) -> u32 {
        self.last_window_hits
    }

    pub fn window_timer(&self) -> f32 {
        self.window_timer
    }

    /// Set the heater, clamped to the allowed range. NaN is ignored.
    pub fn set_left_temperature(&mut self, temperature: f32) {
        if temperature.is_nan() {
            log::warn!("Ignoring NaN wall temperature");
            return;
        }
        let clamped = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        if clamped != temperature {
            log::warn!("Wall temperature {} clamped to {}", temperature, clamped);
        }
        self.left_temperature = clamped;
    }

    pub fn increase_temperature(&mut self) {
        self.left_temperature = (self.left_temperature + TEMPERATURE_STEP).min(MAX_TEMPERATURE);
        log::info!("Left wall temperature: {:.1}", self.left_temperature);
    }

    pub fn decrease_temperature(&mut self) {
        self.left_temperature = (self.left_temperature - TEMPERATURE_STEP).max(MIN_TEMPERATURE);
        log::info!("Left wall temperature: {:.1}", self.left_temperature);
    }

    /// Advance the hit window; once a full second has elapsed the counter restarts.
    pub fn advance_window(&mut self, dt: f32) {
        self.window_timer += dt;
        if self.window_timer >= HIT_WINDOW_SECS {
            self.last_window_hits = self.right_hits;
            self.right_hits = 0;
            self.window_timer = 0.0;
        }
    }

    /// Zero the counters and the window timer; the heater setting is kept
    pub fn reset_counters(&mut self) {
        self.right_hits = 0;
        self.last_window_hits = 0;
        self.window_timer = 0.0;
    }

    /// Bounce a particle off whichever walls it reached.
    ///
    /// Each axis fires at most one branch (left before right, top before
    /// bottom) and clamps the particle so its edge sits on the wall face.
    pub fn reflect(&mut self, particle: &mut Particle, bounds: &ReactorBounds) -> WallContact {
        let half = particle.half_extent();
        let mut contact = WallContact::default();

        if particle.pos.x - half.x <= bounds.inner_left() {
            particle.vel.x = particle.vel.x.abs() * self.left_temperature;
            particle.vel.y *= self.left_temperature;
            particle.pos.x = bounds.inner_left() + half.x;
            contact.left = true;
        } else if particle.pos.x + half.x >= bounds.inner_right() {
            particle.vel.x = -particle.vel.x.abs();
            particle.pos.x = bounds.inner_right() - half.x;
            self.right_hits = self.right_hits.saturating_add(1);
            contact.right = true;
        }

        if particle.pos.y - half.y <= bounds.inner_top() {
            particle.vel.y = particle.vel.y.abs();
            particle.pos.y = bounds.inner_top() + half.y;
            contact.top = true;
        } else if particle.pos.y + half.y >= bounds.inner_bottom() {
            particle.vel.y = -particle.vel.y.abs();
            particle.pos.y = bounds.inner_bottom() - half.y;
            contact.bottom = true;
        }

        contact
    }
}
