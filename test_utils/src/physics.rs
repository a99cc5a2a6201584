//! Simulation builders and stepping helpers used by integration tests.

use gravr::{Control, PhysicsConfig, Simulation, StepEvent};

/// Default configuration with drag switched off.
///
/// # Examples
/// ```
/// use test_utils::physics::drag_free_config;
/// assert_eq!(drag_free_config().drag_multiplier, 0.0);
/// ```
pub fn drag_free_config() -> PhysicsConfig {
    PhysicsConfig::default().without_drag()
}

/// Drag-free configuration measured directly in metres, with the floor at
/// `y = 0`.
///
/// Positions and speeds reported by the body are then in metres and m/s.
/// The step cap is lifted so callers choose the step size.
pub fn metre_config() -> PhysicsConfig {
    PhysicsConfig {
        pixels_per_metre: 1.0,
        floor_y: 0.0,
        drop_x: 0.0,
        settle_speed: 0.01,
        rest_speed: 1e-6,
        max_step_seconds: 1.0,
        ..drag_free_config()
    }
}

/// Builds a simulation and starts it.
///
/// # Panics
/// Panics if the arguments do not describe a valid simulation.
pub fn dropped(config: PhysicsConfig, mass: f64, height: f64) -> Simulation {
    let mut sim = Simulation::new(config, mass, height)
        .unwrap_or_else(|e| panic!("invalid test simulation: {e}"));
    assert!(sim.apply(Control::Start), "fresh simulation should start");
    sim
}

/// Steps `sim` with a fixed `dt` until `done` returns `true` for an event.
///
/// Returns the number of steps taken, or `None` if `max_steps` ran out.
pub fn run_until<F>(sim: &mut Simulation, dt: f64, max_steps: usize, mut done: F) -> Option<usize>
where
    F: FnMut(&StepEvent) -> bool,
{
    (1..=max_steps).find(|_| done(&sim.step(dt)))
}

/// Steps `sim` until it reports its first floor contact.
pub fn run_to_first_contact(sim: &mut Simulation, dt: f64, max_steps: usize) -> Option<StepEvent> {
    let mut contact = None;
    run_until(sim, dt, max_steps, |event| {
        if event.is_contact() {
            contact = Some(*event);
        }
        contact.is_some()
    })?;
    contact
}

/// Time for a drag-free fall from `height` metres under `gravity`.
///
/// # Examples
/// ```
/// use test_utils::physics::free_fall_time;
/// assert!((free_fall_time(2.0, 9.81) - 0.6386).abs() < 1e-3);
/// ```
pub fn free_fall_time(height: f64, gravity: f64) -> f64 {
    (2.0 * height / gravity).sqrt()
}
