//! Headless frame loop.
//!
//! Drives a [`Simulation`] without a window: a [`FrameClock`] supplies the
//! per-frame delta and the loop advances the run until the ball settles.

use std::time::Instant;

use log::{debug, info};

use crate::simulation::{Control, RunSummary, Simulation, SimulationError, StepEvent};

/// Source of per-frame elapsed time.
#[cfg_attr(test, mockall::automock)]
pub trait FrameClock {
    /// Seconds elapsed since the previous call.
    fn delta_seconds(&mut self) -> f64;
}

/// Clock returning the same delta on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    delta: f64,
}

impl FixedClock {
    /// Creates a clock ticking by `delta` seconds per frame.
    #[must_use]
    pub const fn new(delta: f64) -> Self {
        Self { delta }
    }
}

impl FrameClock for FixedClock {
    fn delta_seconds(&mut self) -> f64 {
        self.delta
    }
}

/// Clock measuring real time between frames.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    /// Starts measuring from now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl FrameClock for WallClock {
    fn delta_seconds(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        delta
    }
}

/// Starts `sim` and advances it frame by frame until it settles.
///
/// A simulation that has not been started is started first; one that is
/// paused is resumed.
///
/// # Errors
/// Returns [`SimulationError::DidNotSettle`] when `max_frames` frames pass
/// without the ball settling, and [`SimulationError::Quit`] when a quit
/// request stops the loop early.
pub fn run_to_completion<C>(
    sim: &mut Simulation,
    clock: &mut C,
    max_frames: usize,
) -> Result<RunSummary, SimulationError>
where
    C: FrameClock + ?Sized,
{
    sim.apply(Control::Start);
    sim.apply(Control::Resume);
    for frame in 0..max_frames {
        if sim.quit_requested() {
            info!("quit requested after {frame} frames");
            return Err(SimulationError::Quit { frames: frame });
        }
        for event in sim.advance(clock.delta_seconds()) {
            match event {
                StepEvent::Bounced { impact_speed } => {
                    debug!("frame {frame}: bounce at {impact_speed:.2} units/s");
                }
                StepEvent::Settled(summary) => return Ok(summary),
                StepEvent::Idle | StepEvent::Moved => {}
            }
        }
    }
    sim.summary().ok_or(SimulationError::DidNotSettle { frames: max_frames })
}
