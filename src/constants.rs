//! Default physics and layout constants.
//!
//! These values seed [`crate::PhysicsConfig::default`]. The simulation itself
//! never reads them directly so tests can substitute analytic values such as
//! a zero drag multiplier or a unit distance scale.

/// Screen pixels per metre of simulated distance.
pub const PIXELS_PER_METRE: f64 = 57.78;
/// Gravitational acceleration in m/s².
pub const GRAVITY: f64 = 9.81;
/// Radius of the falling ball in metres (drag cross-section).
pub const BALL_RADIUS: f64 = 0.04;
/// Air density in kg/m³.
pub const AIR_DENSITY: f64 = 1.225;
/// Dynamic viscosity of air in Pa·s.
pub const AIR_VISCOSITY: f64 = 1.81e-5;
/// Presentation multiplier exaggerating the drag force.
pub const DRAG_MULTIPLIER: f64 = 8.0;
/// Coefficient of restitution applied on each bounce.
pub const RESTITUTION: f64 = 0.7;
/// Impact speed (pixels/s) at or below which the ball settles.
pub const SETTLE_SPEED: f64 = 2.0;
/// Speed (pixels/s) below which the ball is treated as at rest for drag.
pub const REST_SPEED: f64 = 0.01;
/// Drag coefficient of a sphere, used while at rest.
pub const BASELINE_DRAG_COEFFICIENT: f64 = 0.47;
/// Lower bound on the Reynolds number inside the Stokes formula.
pub const STOKES_REYNOLDS_FLOOR: f64 = 0.001;
/// Upper bound for a single integration step in seconds.
pub const MAX_STEP_SECONDS: f64 = 0.002;
/// Upper bound for the wall-clock time consumed by one frame in seconds.
pub const MAX_FRAME_SECONDS: f64 = 0.1;

/// Window width in pixels.
pub const WINDOW_WIDTH: f64 = 1280.0;
/// Window height in pixels.
pub const WINDOW_HEIGHT: f64 = 720.0;
/// Rendered ball radius in pixels.
pub const BALL_PIXEL_RADIUS: f64 = 12.0;
/// Floor line in screen coordinates; `+y` points down.
pub const FLOOR_Y: f64 = WINDOW_HEIGHT - BALL_PIXEL_RADIUS;
/// Horizontal drop coordinate in screen coordinates.
pub const DROP_X: f64 = WINDOW_WIDTH / 2.0;

/// Mass used when the entered value is rejected (a tennis ball).
pub const DEFAULT_MASS: f64 = 0.056;
/// Smallest accepted mass in kilograms.
pub const MIN_LAUNCH_MASS: f64 = 0.001;
/// Largest accepted mass in kilograms.
pub const MAX_LAUNCH_MASS: f64 = 100.0;
/// Drop height used when the entered value is rejected.
pub const DEFAULT_HEIGHT: f64 = 2.0;
/// Smallest accepted drop height in metres.
pub const MIN_LAUNCH_HEIGHT: f64 = 1.0;
/// Largest accepted drop height in metres.
pub const MAX_LAUNCH_HEIGHT: f64 = 10.0;
