//! Step and collision policy for a single dropped ball.
//!
//! [`Simulation`] owns the [`Body`], the [`DragModel`] and the run's phase.
//! A tick is split into sub-steps. Each one applies gravity, then drag
//! computed from the velocity carried over from the previous sub-step,
//! integrates once, advances the clock and finally resolves contact with the
//! floor.

use glam::DVec2;
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::body::{Body, BodyError};
use crate::config::{ConfigError, PhysicsConfig};
use crate::drag::DragModel;

/// Errors raised while building or driving a [`Simulation`].
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The physics configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The body could not be created.
    #[error(transparent)]
    Body(#[from] BodyError),
    /// The drop height was negative or non-finite.
    #[error("drop height must be finite and non-negative, got {0}")]
    InvalidHeight(f64),
    /// The ball was still moving after the frame budget ran out.
    #[error("ball did not settle within {frames} frames")]
    DidNotSettle {
        /// Number of frames that were driven.
        frames: usize,
    },
    /// A quit request stopped the run before the ball settled.
    #[error("run stopped by a quit request after {frames} frames")]
    Quit {
        /// Number of frames that were driven.
        frames: usize,
    },
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Phase {
    /// Waiting for the first start request.
    #[default]
    NotStarted,
    /// Physics advances on every step.
    Running,
    /// Physics and the clock are suspended.
    Paused,
    /// The ball has settled; state is frozen until a reset.
    Finished,
}

/// Discrete requests from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Begin the first run.
    Start,
    /// Suspend a running simulation.
    Pause,
    /// Continue a paused simulation.
    Resume,
    /// Restart from the initial drop position.
    Reset,
    /// Ask the driver to stop.
    Quit,
}

/// Terminal timings of a finished run, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// Time from start to the first floor contact.
    pub first_contact: f64,
    /// Time from start until the ball settled.
    pub total_time: f64,
}

/// Outcome of a single call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// Nothing ran because the phase was not [`Phase::Running`].
    Idle,
    /// The body moved without touching the floor.
    Moved,
    /// The body hit the floor and rebounded.
    Bounced {
        /// Speed towards the floor at impact.
        impact_speed: f64,
    },
    /// The body hit the floor too slowly to rebound and the run ended.
    Settled(RunSummary),
}

impl StepEvent {
    /// Returns `true` for bounces and settles.
    #[must_use]
    pub const fn is_contact(&self) -> bool {
        matches!(self, Self::Bounced { .. } | Self::Settled(_))
    }
}

/// A single-body drop simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: PhysicsConfig,
    drag: DragModel,
    body: Body,
    initial_position: DVec2,
    phase: Phase,
    elapsed: f64,
    first_contact: Option<f64>,
    summary: Option<RunSummary>,
    quit_requested: bool,
}

impl Simulation {
    /// Builds a simulation dropping a ball of `mass` kilograms from
    /// `height` metres above the floor.
    ///
    /// # Errors
    /// Returns [`SimulationError`] when the configuration is invalid, the
    /// mass cannot be used, or the height is negative or non-finite.
    ///
    /// # Examples
    /// ```
    /// use gravr::{Phase, PhysicsConfig, Simulation};
    /// let sim = Simulation::new(PhysicsConfig::default(), 1.0, 2.0).unwrap();
    /// assert_eq!(sim.phase(), Phase::NotStarted);
    /// assert!((sim.height_above_floor() - 2.0).abs() < 1e-9);
    /// ```
    pub fn new(config: PhysicsConfig, mass: f64, height: f64) -> Result<Self, SimulationError> {
        config.validate()?;
        if !height.is_finite() || height < 0.0 {
            return Err(SimulationError::InvalidHeight(height));
        }
        let initial_position = DVec2::new(
            config.drop_x,
            config.floor_y - config.metres_to_native(height),
        );
        let body = Body::new(initial_position, mass)?;
        Ok(Self {
            drag: DragModel::from_config(&config),
            config,
            body,
            initial_position,
            phase: Phase::NotStarted,
            elapsed: 0.0,
            first_contact: None,
            summary: None,
            quit_requested: false,
        })
    }

    /// Applies a driver control and reports whether it changed anything.
    ///
    /// Requests that make no sense in the current phase are ignored.
    pub fn apply(&mut self, control: Control) -> bool {
        match (control, self.phase) {
            (Control::Start, Phase::NotStarted) => {
                self.restart();
                info!("simulation started");
                true
            }
            (Control::Pause, Phase::Running) => {
                self.phase = Phase::Paused;
                debug!("simulation paused at {:.3} s", self.elapsed);
                true
            }
            (Control::Resume, Phase::Paused) => {
                self.phase = Phase::Running;
                debug!("simulation resumed at {:.3} s", self.elapsed);
                true
            }
            (Control::Reset, _) => {
                self.restart();
                info!("simulation reset");
                true
            }
            (Control::Quit, _) => {
                self.quit_requested = true;
                true
            }
            (ignored, phase) => {
                debug!("ignoring {ignored:?} while {phase:?}");
                false
            }
        }
    }

    fn restart(&mut self) {
        self.body.place_at_rest(self.initial_position);
        self.elapsed = 0.0;
        self.first_contact = None;
        self.summary = None;
        self.phase = Phase::Running;
    }

    /// Advances the simulation by `dt` seconds of frame time.
    ///
    /// `dt` is clamped to `max_frame_seconds` and integrated in sub-steps of
    /// at most `max_step_seconds`, so `elapsed` grows by the clamped `dt`
    /// unless the ball settles part way. Returns the last contact of the
    /// tick, [`StepEvent::Moved`] if there was none, or [`StepEvent::Idle`]
    /// when the run is not [`Phase::Running`].
    ///
    /// # Examples
    /// ```
    /// use gravr::{Control, PhysicsConfig, Simulation, StepEvent};
    /// let mut sim = Simulation::new(PhysicsConfig::default(), 1.0, 2.0).unwrap();
    /// sim.apply(Control::Start);
    /// assert_eq!(sim.step(1.0 / 60.0), StepEvent::Moved);
    /// assert!((sim.elapsed() - 1.0 / 60.0).abs() < 1e-12);
    /// ```
    pub fn step(&mut self, dt: f64) -> StepEvent {
        if self.phase != Phase::Running {
            return StepEvent::Idle;
        }
        let mut outcome = StepEvent::Moved;
        self.substep(dt, |event| {
            if event.is_contact() {
                outcome = event;
            }
        });
        outcome
    }

    /// Consumes one frame like [`Simulation::step`] but returns every
    /// contact event of the frame, in order.
    ///
    /// Stepping stops early once the run leaves [`Phase::Running`].
    pub fn advance(&mut self, frame_dt: f64) -> Vec<StepEvent> {
        let mut events = Vec::new();
        self.substep(frame_dt, |event| {
            if event.is_contact() {
                events.push(event);
            }
        });
        events
    }

    fn substep<F>(&mut self, dt: f64, mut on_event: F)
    where
        F: FnMut(StepEvent),
    {
        let mut remaining = clamp_seconds(dt, self.config.max_frame_seconds);
        while remaining > 0.0 && self.phase == Phase::Running {
            let step_dt = remaining.min(self.config.max_step_seconds);
            remaining -= step_dt;
            on_event(self.integrate(step_dt));
        }
    }

    fn integrate(&mut self, step_dt: f64) -> StepEvent {
        // Drag reads the velocity before this step's forces are integrated.
        let drag = self.drag.drag_force(self.body.velocity());
        let weight = self.config.native_gravity() * self.body.mass();
        self.body.apply_force(DVec2::new(0.0, weight));
        self.body.apply_force(drag);
        self.body.update(step_dt);
        self.elapsed += step_dt;

        self.resolve_floor_contact()
    }

    fn resolve_floor_contact(&mut self) -> StepEvent {
        let floor_y = self.config.floor_y;
        if self.body.position().y <= floor_y {
            return StepEvent::Moved;
        }
        self.body.position_mut().y = floor_y;
        let impact_speed = self.body.velocity().y.abs();

        if self.first_contact.is_none() {
            info!("first floor contact at {:.3} s", self.elapsed);
        }
        let first_contact = *self.first_contact.get_or_insert(self.elapsed);

        if impact_speed > self.config.settle_speed {
            let velocity = self.body.velocity_mut();
            velocity.y = -velocity.y * self.config.restitution;
            debug!("bounce at {impact_speed:.3} units/s");
            StepEvent::Bounced { impact_speed }
        } else {
            self.body.velocity_mut().y = 0.0;
            self.phase = Phase::Finished;
            let summary = RunSummary {
                first_contact,
                total_time: self.elapsed,
            };
            self.summary = Some(summary);
            info!(
                "ball settled: first contact {:.2} s, total {:.2} s",
                summary.first_contact, summary.total_time
            );
            StepEvent::Settled(summary)
        }
    }

    /// The simulated body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Simulated seconds since the run started, excluding pauses.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Time of the first floor contact in this run, if any.
    #[must_use]
    pub const fn first_contact(&self) -> Option<f64> {
        self.first_contact
    }

    /// Whether the ball has touched the floor in this run.
    #[must_use]
    pub const fn has_touched_ground(&self) -> bool {
        self.first_contact.is_some()
    }

    /// Terminal timings once the run has finished.
    #[must_use]
    pub const fn summary(&self) -> Option<RunSummary> {
        self.summary
    }

    /// Whether the driver has been asked to stop.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Drag model in use.
    #[must_use]
    pub const fn drag(&self) -> &DragModel {
        &self.drag
    }

    /// Where the ball is dropped from.
    #[must_use]
    pub const fn initial_position(&self) -> DVec2 {
        self.initial_position
    }

    /// Height of the body above the floor in metres.
    #[must_use]
    pub fn height_above_floor(&self) -> f64 {
        self.config
            .native_to_metres(self.config.floor_y - self.body.position().y)
    }

    /// Vertical velocity in metres per second, positive downwards.
    #[must_use]
    pub fn vertical_velocity(&self) -> f64 {
        self.config.native_to_metres(self.body.velocity().y)
    }
}

/// Maps `dt` into `[0, max]`, treating non-finite input as zero.
fn clamp_seconds(dt: f64, max: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, max)
    } else {
        0.0
    }
}
