//! Reactor Sim - A 2-D molecule reactor
//!
//! Core modules:
//! - `sim`: Simulation engine (particles, collisions, reactions, walls, statistics)
//! - `settings`: Data-driven reactor configuration
//! - `error`: Configuration-time errors
//!
//! Rendering, windowing and widget plumbing live outside this crate. They read
//! the engine through [`sim::Reactor`] accessors and drive it through
//! [`sim::ReactorCommand`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Default reactor constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest delta-time a caller should hand to `tick` (frame hitch guard)
    pub const MAX_DT: f32 = 0.1;

    /// Reactor placement and size
    pub const REACTOR_X: f32 = 50.0;
    pub const REACTOR_Y: f32 = 300.0;
    pub const REACTOR_WIDTH: f32 = 500.0;
    pub const REACTOR_HEIGHT: f32 = 400.0;
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Resize limits the control layer respects
    pub const MIN_REACTOR_WIDTH: f32 = 200.0;
    pub const MAX_REACTOR_WIDTH: f32 = 800.0;
    pub const REACTOR_WIDTH_STEP: f32 = 10.0;

    /// Particle defaults
    pub const ROUND_RADIUS: f32 = 1.0;
    pub const SQUARE_EDGE: f32 = 2.0;
    /// Unit mass: one round molecule
    pub const ROUND_MASS: f32 = 1.0;
    pub const SQUARE_MASS: f32 = 2.0;
    /// Random velocity components are drawn from [-speed, speed]
    pub const REFERENCE_SPEED: f32 = 100.0;
    pub const INITIAL_ROUND_COUNT: usize = 1000;

    /// Left wall temperature dial
    pub const MIN_TEMPERATURE: f32 = 0.2;
    pub const MAX_TEMPERATURE: f32 = 3.0;
    pub const TEMPERATURE_STEP: f32 = 0.2;

    /// Right-wall hit counting window (simulated seconds)
    pub const HIT_WINDOW_SECS: f32 = 1.0;

    /// Upper bound on rounds produced by one square+square fission
    pub const MAX_FISSION_PRODUCTS: usize = 50;
    /// Fraction of the reference speed used to spread fission products
    pub const FISSION_SPREAD: f32 = 0.3;

    /// Statistics samples retained per series
    pub const HISTORY_CAPACITY: usize = 2048;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp `value` into `[min, max]`, or return the midpoint when the interval is inverted.
///
/// `f32::clamp` panics on `min > max`, which happens when the reactor is
/// narrower than whatever is being fitted into it.
#[inline]
pub fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}

/// Divisor guard: non-positive or non-finite denominators become 1.0
#[inline]
pub fn safe_divisor(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}
