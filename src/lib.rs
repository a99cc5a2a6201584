#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the gravr drop simulation.
//!
//! A single ball falls under gravity, is slowed by Reynolds-dependent drag
//! and bounces on a floor until it settles. The physics core is plain Rust;
//! [`DropPlugin`] drives it from a Bevy app and the `render` feature adds the
//! windowed presentation.
pub mod body;
pub mod config;
pub mod constants;
pub mod drag;
pub mod driver;
pub mod input;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod readout;
pub mod simulation;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use body::{Body, BodyError};
pub use config::{ConfigError, PhysicsConfig};
pub use drag::{DragModel, DragRegime};
pub use driver::{run_to_completion, FixedClock, FrameClock, WallClock};
pub use input::{BallKind, InputError, LaunchParams};
pub use logging::init as init_logging;
pub use physics::applied_acceleration;
pub use plugin::{ControlInbox, DropPlugin, SimulationEvent, SimulationState};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use simulation::{Control, Phase, RunSummary, Simulation, SimulationError, StepEvent};
pub use vector_math::{vec_mag, vec_normalize};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use gravr::prelude::*;
    //! ```

    pub use crate::applied_acceleration;
    pub use crate::Control;
    pub use crate::DropPlugin;
    pub use crate::LaunchParams;
    pub use crate::Phase;
    pub use crate::PhysicsConfig;
    pub use crate::Simulation;
    pub use glam::DVec2;
}
