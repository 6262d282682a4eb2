//! Reactor state
//!
//! [`Reactor`] owns everything the simulation touches: the molecule list,
//! wall state, statistics history and the RNG. Callers hold it and pass it
//! by `&mut` to every mutating call; there is no global instance.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::ReactorBounds;
use super::particle::Particle;
use super::reaction::{ReactionParams, RemovalQueue};
use super::stats::{StatSample, StatisticsSeries};
use super::wall::WallState;
use crate::error::Result;
use crate::settings::Settings;

/// The reactor and its molecules
#[derive(Debug, Clone)]
pub struct Reactor {
    pub(crate) settings: Settings,
    pub(crate) bounds: ReactorBounds,
    pub(crate) wall: WallState,
    /// Creation order; indices are only meaningful within a tick
    pub(crate) particles: Vec<Particle>,
    pub(crate) removals: RemovalQueue,
    pub(crate) stats: StatisticsSeries,
    pub(crate) params: ReactionParams,
    /// Simulated seconds since construction
    pub(crate) time: f64,
    pub(crate) ticks: u64,
    rng: Pcg32,
}

/// Read-only summary for display and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorSnapshot {
    pub ticks: u64,
    pub time: f64,
    pub bounds: ReactorBounds,
    pub left_temperature: f32,
    pub right_hits: u32,
    pub last_window_hits: u32,
    pub latest: StatSample,
}

impl Reactor {
    /// Build an empty reactor. The RNG is seeded from `rng_seed`, or from the
    /// OS when none is given.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let rng = match settings.rng_seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_os_rng(),
        };
        log::info!(
            "Reactor {}x{} at ({}, {}), wall {}",
            settings.reactor_width,
            settings.reactor_height,
            settings.reactor_x,
            settings.reactor_y,
            settings.wall_thickness
        );
        Ok(Self {
            bounds: ReactorBounds::from_settings(&settings),
            wall: WallState::default(),
            particles: Vec::new(),
            removals: RemovalQueue::new(),
            stats: StatisticsSeries::new(settings.history_capacity),
            params: ReactionParams::from_settings(&settings),
            time: 0.0,
            ticks: 0,
            rng,
            settings,
        })
    }

    // === Read access ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> &ReactorBounds {
        &self.bounds
    }

    pub fn wall(&self) -> &WallState {
        &self.wall
    }

    pub fn stats(&self) -> &StatisticsSeries {
        &self.stats
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total momentum of all molecules
    pub fn total_momentum(&self) -> Vec2 {
        self.particles.iter().map(Particle::momentum).sum()
    }

    pub fn snapshot(&self) -> ReactorSnapshot {
        ReactorSnapshot {
            ticks: self.ticks,
            time: self.time,
            bounds: self.bounds,
            left_temperature: self.wall.left_temperature(),
            right_hits: self.wall.right_hits(),
            last_window_hits: self.wall.last_window_hits(),
            latest: self.stats.latest(),
        }
    }

    // === Wall controls ===

    pub fn increase_left_temperature(&mut self) {
        self.wall.increase_temperature();
    }

    pub fn decrease_left_temperature(&mut self) {
        self.wall.decrease_temperature();
    }

    pub fn set_left_temperature(&mut self, temperature: f32) {
        self.wall.set_left_temperature(temperature);
    }

    /// Set the outer width. Only non-positive/non-finite widths are refused;
    /// the control limits are applied by [`super::ReactorCommand`].
    pub fn resize(&mut self, new_width: f32) {
        if self.bounds.resize(new_width) {
            log::info!("Reactor width: {}", new_width);
        }
    }

    // === Seeding ===

    fn random_velocity(&mut self) -> Vec2 {
        let speed = self.settings.reference_speed;
        Vec2::new(
            self.rng.random_range(-speed..=speed),
            self.rng.random_range(-speed..=speed),
        )
    }

    /// Uniform position for a body of the given half-extent inside the interior
    fn random_position(&mut self, half: f32) -> Vec2 {
        let lo = self.bounds.interior_min() + Vec2::splat(half);
        let span = (self.bounds.interior_size() - Vec2::splat(2.0 * half)).max(Vec2::ZERO);
        lo + Vec2::new(
            span.x * self.rng.random::<f32>(),
            span.y * self.rng.random::<f32>(),
        )
    }

    /// Add a round molecule at a random interior position with random velocity
    pub fn add_round(&mut self) {
        let radius = self.settings.round_radius;
        let pos = self.random_position(radius);
        let vel = self.random_velocity();
        self.add_round_at(pos, vel);
    }

    /// Add a square molecule at a random interior position with random velocity
    pub fn add_square(&mut self) {
        let pos = self.random_position(self.settings.square_edge * 0.5);
        let vel = self.random_velocity();
        self.add_square_at(pos, vel, self.settings.square_mass);
    }

    pub fn add_round_at(&mut self, pos: Vec2, vel: Vec2) {
        self.particles.push(Particle::round(
            pos,
            vel,
            self.settings.round_radius,
            self.settings.round_mass,
        ));
    }

    /// Add a square molecule. Non-positive or non-finite masses fall back to
    /// the configured square mass.
    pub fn add_square_at(&mut self, pos: Vec2, vel: Vec2, mass: f32) {
        let mass = if mass.is_finite() && mass > 0.0 {
            mass
        } else {
            log::warn!("Square mass {} replaced by {}", mass, self.settings.square_mass);
            self.settings.square_mass
        };
        self.particles
            .push(Particle::square(pos, vel, self.settings.square_edge, mass));
    }

    /// Add a square molecule with a random velocity
    pub fn add_square_at_random_velocity(&mut self, pos: Vec2, mass: f32) {
        let vel = self.random_velocity();
        self.add_square_at(pos, vel, mass);
    }

    /// Seed `count` random round molecules
    pub fn populate(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.add_round();
        }
        log::info!("Seeded {} round molecules", count);
    }

    /// Drop the most recently added molecule, if any
    pub fn remove_last(&mut self) -> Option<Particle> {
        self.particles.pop()
    }

    /// Remove every molecule and restart the statistics from one zero sample.
    /// The heater setting survives; the right-wall counters do not.
    pub fn clear_all(&mut self) {
        self.particles.clear();
        self.removals.clear();
        self.stats.reset();
        self.wall.reset_counters();
        log::info!("Reactor cleared");
    }
}
