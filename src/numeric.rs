//! Numeric conversion helpers used by the display layer.
//!
//! The physics runs in `f64` screen coordinates while Bevy transforms use
//! `f32` world coordinates centred on the window. These utilities rely on
//! debug assertions to flag unexpected overflows while keeping the call-sites
//! ergonomic.

use glam::{DVec2, Vec2};

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Maps a screen point (origin top-left, `+y` down) into world space
/// (origin at the window centre, `+y` up).
///
/// # Examples
/// ```
/// use glam::{DVec2, Vec2};
/// use gravr::numeric::screen_to_world;
/// let centre = screen_to_world(DVec2::new(640.0, 360.0), DVec2::new(1280.0, 720.0));
/// assert_eq!(centre, Vec2::ZERO);
/// ```
#[must_use]
pub fn screen_to_world(point: DVec2, window: DVec2) -> Vec2 {
    Vec2::new(
        expect_f32(point.x - window.x / 2.0),
        expect_f32(window.y / 2.0 - point.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::top_left(DVec2::ZERO, Vec2::new(-640.0, 360.0))]
    #[case::floor(DVec2::new(640.0, 708.0), Vec2::new(0.0, -348.0))]
    #[case::bottom_right(DVec2::new(1280.0, 720.0), Vec2::new(640.0, -360.0))]
    fn screen_points_map_to_world(#[case] point: DVec2, #[case] expected: Vec2) {
        let window = DVec2::new(1280.0, 720.0);
        assert_eq!(screen_to_world(point, window), expected);
    }

    #[rstest]
    fn expect_f32_keeps_small_values() {
        assert_eq!(expect_f32(1.5), 1.5_f32);
    }
}
