//! Runtime configuration for the physics core.
//!
//! Every constant the simulation depends on is a field of [`PhysicsConfig`]
//! so tests can run with analytic values (no drag, unit scale) and users can
//! tune the model through a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AIR_DENSITY, AIR_VISCOSITY, BALL_RADIUS, BASELINE_DRAG_COEFFICIENT, DRAG_MULTIPLIER, DROP_X,
    FLOOR_Y, GRAVITY, MAX_FRAME_SECONDS, MAX_STEP_SECONDS, PIXELS_PER_METRE, RESTITUTION,
    REST_SPEED, SETTLE_SPEED, STOKES_REYNOLDS_FLOOR,
};

/// Errors raised while loading or validating a [`PhysicsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file was read but is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying TOML failure.
        source: Box<toml::de::Error>,
    },
    /// A field holds a value the model cannot work with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable constraint that failed.
        reason: &'static str,
    },
}

/// Physical constants and frame geometry used by the simulation.
///
/// Distances are in native screen units (pixels) unless the field name says
/// otherwise; `+y` points down towards the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Native distance units per metre.
    pub pixels_per_metre: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Ball radius in metres.
    pub ball_radius: f64,
    /// Air density in kg/m³.
    pub air_density: f64,
    /// Dynamic viscosity of air in Pa·s.
    pub air_viscosity: f64,
    /// Drag exaggeration factor; `0.0` disables drag.
    pub drag_multiplier: f64,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f64,
    /// Impact speed in native units/s at or below which the ball settles.
    pub settle_speed: f64,
    /// Speed in native units/s below which drag is skipped.
    pub rest_speed: f64,
    /// Drag coefficient reported while at rest.
    pub baseline_drag_coefficient: f64,
    /// Floor for the Reynolds number inside the Stokes formula.
    pub stokes_reynolds_floor: f64,
    /// Floor line in native units.
    pub floor_y: f64,
    /// Horizontal coordinate the ball is dropped from.
    pub drop_x: f64,
    /// Largest `dt` integrated in a single sub-step.
    pub max_step_seconds: f64,
    /// Largest frame time consumed by one call to `step` or `advance`.
    pub max_frame_seconds: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_metre: PIXELS_PER_METRE,
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            air_density: AIR_DENSITY,
            air_viscosity: AIR_VISCOSITY,
            drag_multiplier: DRAG_MULTIPLIER,
            restitution: RESTITUTION,
            settle_speed: SETTLE_SPEED,
            rest_speed: REST_SPEED,
            baseline_drag_coefficient: BASELINE_DRAG_COEFFICIENT,
            stokes_reynolds_floor: STOKES_REYNOLDS_FLOOR,
            floor_y: FLOOR_Y,
            drop_x: DROP_X,
            max_step_seconds: MAX_STEP_SECONDS,
            max_frame_seconds: MAX_FRAME_SECONDS,
        }
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl PhysicsConfig {
    /// Reads a TOML file and validates the result.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, does not parse, or
    /// fails [`PhysicsConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: file.to_path_buf(),
            source: Box::new(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is usable by the model.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            positive(self.pixels_per_metre),
            "pixels_per_metre",
            "must be positive",
        )?;
        require(positive(self.gravity), "gravity", "must be positive")?;
        require(positive(self.ball_radius), "ball_radius", "must be positive")?;
        require(positive(self.air_density), "air_density", "must be positive")?;
        require(
            positive(self.air_viscosity),
            "air_viscosity",
            "must be positive",
        )?;
        require(
            non_negative(self.drag_multiplier),
            "drag_multiplier",
            "must not be negative",
        )?;
        require(
            (0.0..=1.0).contains(&self.restitution),
            "restitution",
            "must lie within [0, 1]",
        )?;
        require(
            non_negative(self.settle_speed),
            "settle_speed",
            "must not be negative",
        )?;
        require(
            non_negative(self.rest_speed),
            "rest_speed",
            "must not be negative",
        )?;
        require(
            positive(self.baseline_drag_coefficient),
            "baseline_drag_coefficient",
            "must be positive",
        )?;
        require(
            positive(self.stokes_reynolds_floor),
            "stokes_reynolds_floor",
            "must be positive",
        )?;
        require(self.floor_y.is_finite(), "floor_y", "must be finite")?;
        require(self.drop_x.is_finite(), "drop_x", "must be finite")?;
        require(
            positive(self.max_step_seconds),
            "max_step_seconds",
            "must be positive",
        )?;
        require(
            positive(self.max_frame_seconds),
            "max_frame_seconds",
            "must be positive",
        )
    }

    /// Converts a length in metres into native units.
    #[must_use]
    pub fn metres_to_native(&self, metres: f64) -> f64 {
        metres * self.pixels_per_metre
    }

    /// Converts a length in native units into metres.
    #[must_use]
    pub fn native_to_metres(&self, native: f64) -> f64 {
        native / self.pixels_per_metre
    }

    /// Gravitational acceleration in native units/s².
    #[must_use]
    pub fn native_gravity(&self) -> f64 {
        self.metres_to_native(self.gravity)
    }

    /// Returns a copy with drag disabled.
    #[must_use]
    pub fn without_drag(mut self) -> Self {
        self.drag_multiplier = 0.0;
        self
    }
}
