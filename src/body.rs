//! Point-mass body with force accumulation and semi-implicit Euler
//! integration.
//!
//! A [`Body`] collects forces through [`Body::apply_force`] and turns them
//! into motion once per frame in [`Body::update`]. The acceleration is a
//! per-step scratch value and never survives an update.

use glam::DVec2;
use thiserror::Error;

use crate::physics::{applied_acceleration, is_valid_mass};

/// Errors raised while constructing a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    /// The mass was non-finite or not above [`crate::physics::MIN_MASS`].
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f64),
}

/// A single falling particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    mass: f64,
}

impl Body {
    /// Creates a body at rest at `position`.
    ///
    /// # Errors
    /// Returns [`BodyError::InvalidMass`] when `mass` cannot divide a force.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec2;
    /// use gravr::Body;
    /// let body = Body::new(DVec2::new(0.0, 10.0), 2.0).unwrap();
    /// assert_eq!(body.velocity(), DVec2::ZERO);
    /// assert!(Body::new(DVec2::ZERO, 0.0).is_err());
    /// ```
    pub fn new(position: DVec2, mass: f64) -> Result<Self, BodyError> {
        if !is_valid_mass(mass) {
            return Err(BodyError::InvalidMass(mass));
        }
        Ok(Self {
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            mass,
        })
    }

    /// Accumulates `force / mass` into the pending acceleration.
    pub fn apply_force(&mut self, force: DVec2) {
        // Mass is validated at construction so the division cannot fail.
        if let Some(accel) = applied_acceleration(force, self.mass) {
            self.acceleration += accel;
        }
    }

    /// Advances the body by `dt` seconds and clears the acceleration.
    ///
    /// Velocity is updated first and the new velocity moves the position.
    /// Negative or non-finite `dt` is treated as zero.
    pub fn update(&mut self, dt: f64) {
        let step = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.velocity += self.acceleration * step;
        self.position += self.velocity * step;
        self.acceleration = DVec2::ZERO;
    }

    /// Current position in native units.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity in native units per second.
    #[must_use]
    pub const fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Acceleration accumulated since the last update.
    #[must_use]
    pub const fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    /// Mass in kilograms.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Magnitude of the velocity.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub(crate) fn position_mut(&mut self) -> &mut DVec2 {
        &mut self.position
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut DVec2 {
        &mut self.velocity
    }

    /// Puts the body back at `position`, at rest, with no pending forces.
    pub(crate) fn place_at_rest(&mut self, position: DVec2) {
        self.position = position;
        self.velocity = DVec2::ZERO;
        self.acceleration = DVec2::ZERO;
    }
}
