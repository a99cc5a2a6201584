//! Bevy plugin driving a [`Simulation`] from the app schedule.
//!
//! The plugin owns the simulation as a resource, feeds it the frame time each
//! `Update`, and turns bounces and settles into observable events. Controls
//! arrive through [`ControlInbox`] so that keyboard handling, tests and
//! scripted drivers share one path.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error, info};
use thiserror::Error;

use crate::config::PhysicsConfig;
use crate::input::LaunchParams;
use crate::simulation::{Control, Phase, RunSummary, Simulation, StepEvent};

/// The running simulation together with the parameters it was launched with.
#[derive(Resource, Debug, Clone)]
pub struct SimulationState {
    /// Simulation advanced by [`step_simulation_system`].
    pub simulation: Simulation,
    /// Launch parameters shown in the readouts.
    pub launch: LaunchParams,
}

/// Pending controls applied at the start of the next `Update`.
#[derive(Resource, Default, Debug)]
pub struct ControlInbox {
    controls: Vec<Control>,
}

impl ControlInbox {
    /// Queues a control.
    pub fn push(&mut self, control: Control) {
        self.controls.push(control);
    }

    /// Queues several controls in order.
    pub fn extend<I: IntoIterator<Item = Control>>(&mut self, controls: I) {
        self.controls.extend(controls);
    }

    /// Removes and returns every queued control.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Control> {
        self.controls.drain(..)
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Floor contact observed while advancing the simulation.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationEvent {
    /// The ball rebounded off the floor.
    Bounced {
        /// Impact speed in metres per second.
        impact_speed: f64,
    },
    /// The ball came to rest and the run finished.
    Settled(RunSummary),
}

/// Raised when the plugin cannot build its simulation.
#[derive(Event, Debug, Clone, Error)]
#[error("failed to set up the drop simulation: {detail}")]
pub struct DropSetupError {
    /// Description of the underlying error.
    pub detail: String,
}

impl DropSetupError {
    /// Wraps an error description.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_simulation_event(event: On<SimulationEvent>) {
    match event.event() {
        SimulationEvent::Bounced { impact_speed } => {
            debug!("bounce, impact {impact_speed:.2} m/s");
        }
        SimulationEvent::Settled(summary) => {
            info!(
                "settled after {:.2} s (first contact {:.2} s)",
                summary.total_time, summary.first_contact
            );
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_setup_error(event: On<DropSetupError>) {
    error!("{}", event.event());
}

/// Keys relevant to the simulation that were pressed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly four control keys."
)]
pub struct KeyPresses {
    /// Enter: start or resume.
    pub enter: bool,
    /// Backspace: pause.
    pub backspace: bool,
    /// Digit 0: reset.
    pub digit0: bool,
    /// Escape: quit.
    pub escape: bool,
}

/// Maps this frame's key presses to at most one control.
///
/// Quit wins over reset, reset over pause, pause over start. Reset is only
/// offered once a run has been started.
///
/// # Examples
/// ```
/// use gravr::plugin::{control_for_keys, KeyPresses};
/// use gravr::{Control, Phase};
/// let enter = KeyPresses { enter: true, ..Default::default() };
/// assert_eq!(control_for_keys(enter, Phase::NotStarted), Some(Control::Start));
/// assert_eq!(control_for_keys(enter, Phase::Paused), Some(Control::Resume));
/// assert_eq!(control_for_keys(enter, Phase::Running), None);
/// ```
#[must_use]
pub const fn control_for_keys(keys: KeyPresses, phase: Phase) -> Option<Control> {
    if keys.escape {
        return Some(Control::Quit);
    }
    match phase {
        Phase::NotStarted if keys.enter => Some(Control::Start),
        Phase::NotStarted => None,
        _ if keys.digit0 => Some(Control::Reset),
        Phase::Running if keys.backspace => Some(Control::Pause),
        Phase::Paused if keys.enter => Some(Control::Resume),
        _ => None,
    }
}

/// Applies queued controls to the simulation.
pub fn apply_controls_system(
    mut inbox: ResMut<ControlInbox>,
    mut state: ResMut<SimulationState>,
) {
    if inbox.is_empty() {
        return;
    }
    for control in inbox.drain() {
        state.simulation.apply(control);
    }
}

/// Advances the simulation by this frame's delta and triggers
/// [`SimulationEvent`]s for every floor contact.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn step_simulation_system(
    time: Res<Time>,
    mut state: ResMut<SimulationState>,
    mut commands: Commands,
) {
    let ppm = state.simulation.config().pixels_per_metre;
    for event in state.simulation.advance(time.delta_secs_f64()) {
        match event {
            StepEvent::Bounced { impact_speed } => {
                commands.trigger(SimulationEvent::Bounced {
                    impact_speed: impact_speed / ppm,
                });
            }
            StepEvent::Settled(summary) => {
                commands.trigger(SimulationEvent::Settled(summary));
            }
            StepEvent::Idle | StepEvent::Moved => {}
        }
    }
}

/// Requests app exit once the simulation has been asked to quit.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn exit_on_quit_system(state: Res<SimulationState>, mut exit: MessageWriter<AppExit>) {
    if state.simulation.quit_requested() {
        info!("quit requested, exiting");
        exit.write(AppExit::Success);
    }
}

/// System set containing the plugin's per-frame systems, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropSystems;

/// Bevy plugin installing the drop simulation.
#[derive(Debug, Clone, Default)]
pub struct DropPlugin {
    /// Physics configuration for the run.
    pub config: PhysicsConfig,
    /// Mass and height of the dropped ball.
    pub launch: LaunchParams,
}

impl Plugin for DropPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_simulation_event);
        app.add_observer(log_setup_error);

        let simulation =
            match Simulation::new(self.config.clone(), self.launch.mass, self.launch.height) {
                Ok(simulation) => simulation,
                Err(e) => {
                    app.world_mut().trigger(DropSetupError::new(e.to_string()));
                    return;
                }
            };

        app.insert_resource(SimulationState {
            simulation,
            launch: self.launch,
        });
        app.init_resource::<ControlInbox>();
        app.add_systems(
            Update,
            (
                apply_controls_system,
                step_simulation_system,
                exit_on_quit_system,
            )
                .chain()
                .in_set(DropSystems),
        );
    }
}
