//! Text readouts shown by the display layer.
//!
//! All functions are pure so the strings can be checked without a window.

use crate::input::{BallKind, LaunchParams};
use crate::simulation::{Phase, RunSummary, Simulation};

/// Vertical velocity, e.g. `"3.13 m/s"`. Positive values point down.
#[must_use]
pub fn velocity_text(sim: &Simulation) -> String {
    format!("{:.2} m/s", sim.vertical_velocity())
}

/// Height above the floor, e.g. `"1.50 m"`.
#[must_use]
pub fn height_text(sim: &Simulation) -> String {
    format!("{:.2} m", sim.height_above_floor())
}

/// Elapsed run time, e.g. `"0.64 s"`.
#[must_use]
pub fn time_text(seconds: f64) -> String {
    format!("{seconds:.2} s")
}

/// Terminal result line.
///
/// # Examples
/// ```
/// use gravr::readout::finished_text;
/// use gravr::RunSummary;
/// let text = finished_text(&RunSummary { first_contact: 0.638, total_time: 2.5 });
/// assert_eq!(text, "First contact: 0.64 s | Total time: 2.50 s");
/// ```
#[must_use]
pub fn finished_text(summary: &RunSummary) -> String {
    format!(
        "First contact: {:.2} s | Total time: {:.2} s",
        summary.first_contact, summary.total_time
    )
}

/// Mass label with the matching ball type.
#[must_use]
pub fn mass_text(mass: f64) -> String {
    format!("Mass: {mass:.3} kg ({})", BallKind::from_mass(mass).label())
}

/// Starting height label.
#[must_use]
pub fn drop_height_text(height: f64) -> String {
    format!("Height: {height:.3} m")
}

/// Prompt or hint line for the current phase.
#[must_use]
pub const fn phase_hint(phase: Phase) -> &'static str {
    match phase {
        Phase::NotStarted => "Press Enter to start the simulation",
        Phase::Running | Phase::Finished => {
            "Press Backspace to stop the simulation, 0 to reset, Esc to quit"
        }
        Phase::Paused => "Press Enter to resume the simulation",
    }
}

/// Every string the display layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    /// Phase-specific hint line.
    pub hint: &'static str,
    /// Velocity next to the ball.
    pub velocity: String,
    /// Height next to the ball.
    pub height: String,
    /// Running clock, or the result line once finished.
    pub time: String,
    /// Launch mass label.
    pub mass: String,
    /// Launch height label.
    pub drop_height: String,
}

impl Readout {
    /// Collects the readout for the current state of `sim`.
    #[must_use]
    pub fn capture(sim: &Simulation, launch: &LaunchParams) -> Self {
        let time = sim
            .summary()
            .map_or_else(|| time_text(sim.elapsed()), |summary| finished_text(&summary));
        Self {
            hint: phase_hint(sim.phase()),
            velocity: velocity_text(sim),
            height: height_text(sim),
            time,
            mass: mass_text(launch.mass),
            drop_height: drop_height_text(launch.height),
        }
    }
}
