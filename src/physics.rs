//! Physics helper functions.
//!
//! Provides the `F = m·a` helper shared by the body model. It operates on
//! plain vectors so it can be reused by the integrator and in standalone
//! unit tests.

use glam::DVec2;

/// Smallest acceptable mass to avoid numerically unstable accelerations.
pub const MIN_MASS: f64 = 1e-12;

/// Returns `true` when `mass` is finite and above [`MIN_MASS`].
#[must_use]
pub fn is_valid_mass(mass: f64) -> bool {
    mass.is_finite() && mass > MIN_MASS
}

/// Computes acceleration from a force vector and a mass.
///
/// Returns `None` if `mass` is non-positive, non-finite or effectively zero
/// (see [`MIN_MASS`]). The calculation applies `F=ma` for each component
/// independently.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use gravr::applied_acceleration;
/// let accel = applied_acceleration(DVec2::new(7.0, -14.0), 7.0).unwrap();
/// assert!((accel.x - 1.0).abs() < 1e-9);
/// assert!((accel.y + 2.0).abs() < 1e-9);
/// assert!(applied_acceleration(DVec2::X, 0.0).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: DVec2, mass: f64) -> Option<DVec2> {
    is_valid_mass(mass).then(|| force / mass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::explicit_mass(DVec2::new(7.0, -14.0), 7.0, Some(DVec2::new(1.0, -2.0)))]
    #[case::light_mass(DVec2::new(0.056, 0.0), 0.056, Some(DVec2::new(1.0, 0.0)))]
    #[case::zero_mass(DVec2::ONE, 0.0, None)]
    #[case::negative_mass(DVec2::ONE, -5.0, None)]
    #[case::below_floor(DVec2::ONE, 1e-13, None)]
    #[case::nan_mass(DVec2::ONE, f64::NAN, None)]
    fn acceleration_cases(
        #[case] force: DVec2,
        #[case] mass: f64,
        #[case] expected: Option<DVec2>,
    ) {
        match (applied_acceleration(force, mass), expected) {
            (Some(a), Some(e)) => {
                assert_relative_eq!(a.x, e.x);
                assert_relative_eq!(a.y, e.y);
            }
            (None, None) => {}
            (a, e) => panic!("mismatch: {a:?} vs {e:?}"),
        }
    }
}
