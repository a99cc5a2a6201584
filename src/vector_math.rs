//! Basic vector math helper functions.
//! Small helpers for speeds and unit directions of planar vectors.
use glam::DVec2;

/// Returns the magnitude of a vector expressed by its components.
///
/// # Examples
/// ```
/// use gravr::vector_math::vec_mag;
/// let magnitude = vec_mag(3.0, 4.0);
/// assert!((magnitude - 5.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn vec_mag(component_x: f64, component_y: f64) -> f64 {
    DVec2::new(component_x, component_y).length()
}

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite input and the zero vector both yield [`DVec2::ZERO`].
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use gravr::vec_normalize;
/// let unit = vec_normalize(DVec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-12);
/// assert!((unit.y - 0.8).abs() < 1e-12);
/// assert_eq!(vec_normalize(DVec2::ZERO), DVec2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(vector: DVec2) -> DVec2 {
    if !vector.is_finite() {
        return DVec2::ZERO;
    }
    vector.try_normalize().unwrap_or(DVec2::ZERO)
}
