//! Headless Bevy app builders for plugin tests.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use gravr::{Control, ControlInbox, DropPlugin, SimulationState};

/// Builds an app with [`MinimalPlugins`] and `plugin`, advancing virtual time
/// by exactly `frame_dt` seconds per update.
pub fn drop_app(plugin: DropPlugin, frame_dt: f64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        frame_dt,
    )));
    app.add_plugins(plugin);
    app
}

/// Queues `control` for the next update.
///
/// # Panics
/// Panics if the app has no [`ControlInbox`].
pub fn send_control(app: &mut App, control: Control) {
    app.world_mut().resource_mut::<ControlInbox>().push(control);
}

/// Read-only view of the simulation resource.
///
/// # Panics
/// Panics if the app has no [`SimulationState`].
pub fn state(app: &App) -> &SimulationState {
    app.world().resource::<SimulationState>()
}
