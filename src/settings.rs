//! Reactor settings
//!
//! Every tunable the engine reads lives here. Loaded from JSON (any missing
//! field falls back to its default) and validated before a reactor is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Reactor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Reactor geometry ===
    /// Left edge of the outer reactor rectangle
    pub reactor_x: f32,
    /// Top edge of the outer reactor rectangle
    pub reactor_y: f32,
    /// Outer width (walls included)
    pub reactor_width: f32,
    /// Outer height (walls included)
    pub reactor_height: f32,
    /// Thickness of each of the four walls
    pub wall_thickness: f32,

    // === Molecules ===
    /// Radius of round molecules
    pub round_radius: f32,
    /// Edge length of square molecules
    pub square_edge: f32,
    /// Mass of one round molecule (the unit mass)
    pub round_mass: f32,
    /// Mass of a freshly added square molecule
    pub square_mass: f32,
    /// Random velocity range and fission spread reference
    pub reference_speed: f32,
    /// Round molecules seeded by the runner at startup
    pub initial_round_count: usize,
    /// Cap on rounds produced by one fission
    pub max_fission_products: usize,

    // === Statistics ===
    /// Samples kept per statistics series
    pub history_capacity: usize,

    // === RNG ===
    /// Fixed seed for reproducible runs; `None` seeds from the OS
    pub rng_seed: Option<u64>,

    // === Control limits ===
    /// Narrowest width the widen/narrow controls allow
    pub min_width: f32,
    /// Widest width the widen/narrow controls allow
    pub max_width: f32,
    /// Width change per widen/narrow step
    pub width_step: f32,
    /// Frame delta clamp applied by the caller before ticking
    pub max_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reactor_x: REACTOR_X,
            reactor_y: REACTOR_Y,
            reactor_width: REACTOR_WIDTH,
            reactor_height: REACTOR_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            round_radius: ROUND_RADIUS,
            square_edge: SQUARE_EDGE,
            round_mass: ROUND_MASS,
            square_mass: SQUARE_MASS,
            reference_speed: REFERENCE_SPEED,
            initial_round_count: INITIAL_ROUND_COUNT,
            max_fission_products: MAX_FISSION_PRODUCTS,

            history_capacity: HISTORY_CAPACITY,

            rng_seed: None,

            min_width: MIN_REACTOR_WIDTH,
            max_width: MAX_REACTOR_WIDTH,
            width_step: REACTOR_WIDTH_STEP,
            max_dt: MAX_DT,
        }
    }
}

impl Settings {
    /// Default settings with a fixed RNG seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Interior width (between the side walls)
    pub fn interior_width(&self) -> f32 {
        self.reactor_width - 2.0 * self.wall_thickness
    }

    /// Interior height (between the top and bottom walls)
    pub fn interior_height(&self) -> f32 {
        self.reactor_height - 2.0 * self.wall_thickness
    }

    /// Check every value the engine divides by, clamps with, or sizes buffers from
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("reactor_width", self.reactor_width),
            ("reactor_height", self.reactor_height),
            ("round_radius", self.round_radius),
            ("square_edge", self.square_edge),
            ("round_mass", self.round_mass),
            ("square_mass", self.square_mass),
            ("reference_speed", self.reference_speed),
            ("width_step", self.width_step),
            ("max_dt", self.max_dt),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }

        let finite = [
            ("reactor_x", self.reactor_x),
            ("reactor_y", self.reactor_y),
            ("wall_thickness", self.wall_thickness),
            ("min_width", self.min_width),
            ("max_width", self.max_width),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be finite")));
            }
        }

        if self.wall_thickness < 0.0 {
            return Err(Error::InvalidConfig(
                "wall_thickness must be non-negative".into(),
            ));
        }
        if self.interior_width() <= 0.0 || self.interior_height() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "reactor interior must be positive (got {}x{})",
                self.interior_width(),
                self.interior_height()
            )));
        }
        if self.history_capacity == 0 {
            return Err(Error::InvalidConfig(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.max_fission_products == 0 {
            return Err(Error::InvalidConfig(
                "max_fission_products must be at least 1".into(),
            ));
        }
        if self.min_width > self.max_width {
            return Err(Error::InvalidConfig(format!(
                "min_width ({}) exceeds max_width ({})",
                self.min_width, self.max_width
            )));
        }
        Ok(())
    }
}
