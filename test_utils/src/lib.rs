//! Utility helpers for tests.
//!
//! [`physics`] builds simulations with analytic configurations and steps them
//! until a condition holds; [`app`] assembles a headless Bevy app around
//! [`gravr::DropPlugin`] with a deterministic clock.

pub mod app;
pub mod physics;

/// Assert that `actual` lies within `tolerance` of `expected`.
///
/// # Panics
/// Panics with a message naming `what` if the values differ by more than
/// `tolerance`.
pub fn assert_close(what: &str, actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Assert that `actual` is within `fraction` of `expected`, relative to
/// `expected`.
///
/// # Panics
/// Panics with a message naming `what` if the relative error is too large.
pub fn assert_relative(what: &str, actual: f64, expected: f64, fraction: f64) {
    assert_close(what, actual, expected, expected.abs() * fraction);
}
