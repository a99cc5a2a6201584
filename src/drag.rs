//! Aerodynamic drag on a sphere.
//!
//! The drag coefficient is chosen from the Reynolds number of the flow
//! around the ball. Regimes are half-open on their lower bound:
//!
//! | Reynolds number      | Regime                  | `Cd`                          |
//! |----------------------|-------------------------|-------------------------------|
//! | `Re < 0.1`           | [`DragRegime::Stokes`]       | `24 / max(Re, floor)`         |
//! | `0.1 ≤ Re < 1000`    | [`DragRegime::Transitional`] | `24/Re · (1 + 0.15·Re^0.687)` |
//! | `1000 ≤ Re < 3e5`    | [`DragRegime::Newton`]       | `0.44`                        |
//! | `Re ≥ 3e5`           | [`DragRegime::PostCritical`] | `0.1`                         |
//!
//! The table is not smoothed: each boundary carries a small jump, and the
//! drag crisis at `3e5` drops the coefficient by `0.34`.

use std::f64::consts::PI;

use glam::DVec2;

use crate::config::PhysicsConfig;
use crate::vector_math::vec_normalize;

/// Upper bound of the Stokes regime.
pub const STOKES_LIMIT: f64 = 0.1;
/// Upper bound of the transitional regime.
pub const TRANSITIONAL_LIMIT: f64 = 1000.0;
/// Reynolds number of the drag crisis.
pub const CRITICAL_REYNOLDS: f64 = 300_000.0;
/// Drag coefficient on the Newton plateau.
pub const NEWTON_COEFFICIENT: f64 = 0.44;
/// Drag coefficient past the drag crisis.
pub const POST_CRITICAL_COEFFICIENT: f64 = 0.1;

/// Flow regime selected by the Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragRegime {
    /// Creeping flow, `Re < 0.1`.
    Stokes,
    /// Schiller–Naumann correlation, `0.1 ≤ Re < 1000`.
    Transitional,
    /// Constant plateau, `1000 ≤ Re < 300000`.
    Newton,
    /// Turbulent boundary layer, `Re ≥ 300000`.
    PostCritical,
}

impl DragRegime {
    /// Selects the regime for `reynolds`.
    ///
    /// # Examples
    /// ```
    /// use gravr::DragRegime;
    /// assert_eq!(DragRegime::classify(0.05), DragRegime::Stokes);
    /// assert_eq!(DragRegime::classify(0.1), DragRegime::Transitional);
    /// assert_eq!(DragRegime::classify(1000.0), DragRegime::Newton);
    /// assert_eq!(DragRegime::classify(300_000.0), DragRegime::PostCritical);
    /// ```
    #[must_use]
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < STOKES_LIMIT {
            Self::Stokes
        } else if reynolds < TRANSITIONAL_LIMIT {
            Self::Transitional
        } else if reynolds < CRITICAL_REYNOLDS {
            Self::Newton
        } else {
            Self::PostCritical
        }
    }

    /// Evaluates this regime's formula at `reynolds`, whether or not the
    /// value lies inside the regime.
    #[must_use]
    pub fn coefficient(self, reynolds: f64, stokes_floor: f64) -> f64 {
        match self {
            Self::Stokes => 24.0 / reynolds.max(stokes_floor),
            Self::Transitional => 24.0 / reynolds * (1.0 + 0.15 * reynolds.powf(0.687)),
            Self::Newton => NEWTON_COEFFICIENT,
            Self::PostCritical => POST_CRITICAL_COEFFICIENT,
        }
    }
}

/// Piecewise drag coefficient as a function of the Reynolds number.
#[must_use]
pub fn coefficient_for_reynolds(reynolds: f64, stokes_floor: f64) -> f64 {
    DragRegime::classify(reynolds).coefficient(reynolds, stokes_floor)
}

/// Drag model for the fixed ball geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DragModel {
    radius: f64,
    air_density: f64,
    air_viscosity: f64,
    multiplier: f64,
    pixels_per_metre: f64,
    rest_speed: f64,
    baseline_coefficient: f64,
    stokes_floor: f64,
}

impl DragModel {
    /// Builds the model from the relevant [`PhysicsConfig`] fields.
    #[must_use]
    pub const fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            radius: config.ball_radius,
            air_density: config.air_density,
            air_viscosity: config.air_viscosity,
            multiplier: config.drag_multiplier,
            pixels_per_metre: config.pixels_per_metre,
            rest_speed: config.rest_speed,
            baseline_coefficient: config.baseline_drag_coefficient,
            stokes_floor: config.stokes_reynolds_floor,
        }
    }

    /// Frontal area `π·r²` in m².
    #[must_use]
    pub fn cross_section_area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Reynolds number for a speed given in native units per second.
    #[must_use]
    pub fn reynolds_number(&self, speed: f64) -> f64 {
        let speed_mps = speed / self.pixels_per_metre;
        self.air_density * speed_mps * (2.0 * self.radius) / self.air_viscosity
    }

    /// Returns `true` when `speed` is too small to compute drag from.
    fn at_rest(&self, speed: f64) -> bool {
        !speed.is_finite() || speed < self.rest_speed
    }

    /// Regime for `velocity`, or `None` while at rest.
    #[must_use]
    pub fn regime(&self, velocity: DVec2) -> Option<DragRegime> {
        let speed = velocity.length();
        (!self.at_rest(speed)).then(|| DragRegime::classify(self.reynolds_number(speed)))
    }

    /// Drag coefficient for `velocity`.
    ///
    /// Below the rest speed the sphere's baseline coefficient is returned
    /// without evaluating the Reynolds number.
    #[must_use]
    pub fn drag_coefficient(&self, velocity: DVec2) -> f64 {
        let speed = velocity.length();
        if self.at_rest(speed) {
            return self.baseline_coefficient;
        }
        coefficient_for_reynolds(self.reynolds_number(speed), self.stokes_floor)
    }

    /// Drag force in native force units, opposing `velocity`.
    ///
    /// Returns exactly [`DVec2::ZERO`] below the rest speed.
    #[must_use]
    pub fn drag_force(&self, velocity: DVec2) -> DVec2 {
        let speed = velocity.length();
        if self.at_rest(speed) {
            return DVec2::ZERO;
        }
        let speed_mps = speed / self.pixels_per_metre;
        let magnitude = 0.5
            * self.air_density
            * speed_mps
            * speed_mps
            * self.drag_coefficient(velocity)
            * self.cross_section_area()
            * self.multiplier;
        -vec_normalize(velocity) * magnitude * self.pixels_per_metre
    }

    /// Drag exaggeration factor in use.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASELINE_DRAG_COEFFICIENT, STOKES_REYNOLDS_FLOOR};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn model() -> DragModel {
        DragModel::from_config(&PhysicsConfig::default())
    }

    /// Unit scale and unit fluid so forces are easy to compute by hand.
    #[fixture]
    fn unit_model() -> DragModel {
        DragModel::from_config(&PhysicsConfig {
            pixels_per_metre: 1.0,
            air_density: 1.0,
            air_viscosity: 1.0,
            ball_radius: 0.5,
            drag_multiplier: 1.0,
            ..PhysicsConfig::default()
        })
    }

    #[rstest]
    #[case::stokes(0.099_999, DragRegime::Stokes)]
    #[case::transitional_lower(0.1, DragRegime::Transitional)]
    #[case::transitional_upper(999.999, DragRegime::Transitional)]
    #[case::newton_lower(1000.0, DragRegime::Newton)]
    #[case::newton_upper(299_999.9, DragRegime::Newton)]
    #[case::post_critical(300_000.0, DragRegime::PostCritical)]
    fn regimes_are_half_open(#[case] reynolds: f64, #[case] expected: DragRegime) {
        assert_eq!(DragRegime::classify(reynolds), expected);
    }

    #[rstest]
    fn stokes_uses_floor_at_zero() {
        let cd = coefficient_for_reynolds(0.0, STOKES_REYNOLDS_FLOOR);
        assert_relative_eq!(cd, 24.0 / STOKES_REYNOLDS_FLOOR);
    }

    #[rstest]
    fn boundary_jump_at_stokes_limit_is_small() {
        let below = DragRegime::Stokes.coefficient(STOKES_LIMIT, STOKES_REYNOLDS_FLOOR);
        let above = DragRegime::Transitional.coefficient(STOKES_LIMIT, STOKES_REYNOLDS_FLOOR);
        // 240 against roughly 247.4: about a 3% step.
        assert_relative_eq!(below, 240.0);
        assert!(above > below);
        assert!((above - below) / below < 0.05, "jump {}", above - below);
    }

    #[rstest]
    fn boundary_jump_at_newton_plateau_is_small() {
        let below =
            DragRegime::Transitional.coefficient(TRANSITIONAL_LIMIT, STOKES_REYNOLDS_FLOOR);
        let above = DragRegime::Newton.coefficient(TRANSITIONAL_LIMIT, STOKES_REYNOLDS_FLOOR);
        // Schiller–Naumann gives about 0.438 here.
        assert!((above - below).abs() < 0.01, "jump {}", above - below);
    }

    #[rstest]
    fn drag_crisis_drops_coefficient() {
        let below = DragRegime::Newton.coefficient(CRITICAL_REYNOLDS, STOKES_REYNOLDS_FLOOR);
        let above =
            DragRegime::PostCritical.coefficient(CRITICAL_REYNOLDS, STOKES_REYNOLDS_FLOOR);
        assert_relative_eq!(below - above, 0.34, epsilon = 1e-12);
    }

    #[rstest]
    fn cross_section_is_disc_area(model: DragModel) {
        assert_relative_eq!(model.cross_section_area(), PI * 0.04 * 0.04);
    }

    #[rstest]
    fn reynolds_converts_native_units(model: DragModel) {
        // One metre per second expressed in pixels.
        let re = model.reynolds_number(57.78);
        assert_relative_eq!(re, 1.225 * 0.08 / 1.81e-5, max_relative = 1e-12);
    }

    #[rstest]
    #[case::zero(DVec2::ZERO)]
    #[case::below_threshold(DVec2::new(0.005, 0.005))]
    fn at_rest_has_no_drag(model: DragModel, #[case] velocity: DVec2) {
        assert_eq!(model.drag_force(velocity), DVec2::ZERO);
        assert_relative_eq!(model.drag_coefficient(velocity), BASELINE_DRAG_COEFFICIENT);
        assert!(model.regime(velocity).is_none());
    }

    #[rstest]
    fn non_finite_velocity_has_no_drag(model: DragModel) {
        assert_eq!(model.drag_force(DVec2::new(f64::NAN, 1.0)), DVec2::ZERO);
    }

    #[rstest]
    fn drag_opposes_velocity(model: DragModel) {
        let velocity = DVec2::new(30.0, 400.0);
        let force = model.drag_force(velocity);
        assert!(force.length() > 0.0);
        assert_relative_eq!(
            force.normalize().dot(velocity.normalize()),
            -1.0,
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn drag_magnitude_matches_formula(unit_model: DragModel) {
        let velocity = DVec2::new(0.0, 2000.0);
        // Re = 1 * 2000 * 1 / 1 = 2000, Newton plateau.
        assert_eq!(unit_model.regime(velocity), Some(DragRegime::Newton));
        let expected = 0.5 * 2000.0 * 2000.0 * NEWTON_COEFFICIENT * PI * 0.25;
        let force = unit_model.drag_force(velocity);
        assert_relative_eq!(force.y, -expected, max_relative = 1e-12);
        assert_relative_eq!(force.x, 0.0);
    }

    #[rstest]
    fn zero_multiplier_disables_drag() {
        let model = DragModel::from_config(&PhysicsConfig::default().without_drag());
        assert_eq!(model.drag_force(DVec2::new(0.0, 500.0)).length(), 0.0);
    }

    #[rstest]
    fn force_grows_with_speed(model: DragModel) {
        let slow = model.drag_force(DVec2::new(0.0, 100.0)).length();
        let fast = model.drag_force(DVec2::new(0.0, 400.0)).length();
        assert!(fast > slow);
    }
}
