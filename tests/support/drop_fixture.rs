//! Shared rspec fixture wrapping a headless Bevy app running `DropPlugin`.
//!
//! rspec requires its environment to be `Clone + Send + Sync`, so the app sits
//! behind an `Arc<Mutex<_>>` and every suite runs serially.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use gravr::{Control, DropPlugin, Phase, RunSummary, SimulationEvent};
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use test_utils::app::{drop_app, send_control, state};

/// Frame length used by every fixture.
pub const FRAME_DT: f64 = 1.0 / 60.0;

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
#[derive(Debug)]
pub struct ThreadSafeApp(pub App);

// SAFETY: suites run with `parallel(false)` and every access to the wrapped
// `App` goes through the mutex below.
unsafe impl Send for ThreadSafeApp {}
unsafe impl Sync for ThreadSafeApp {}

/// Simulation events seen by the test observer, in trigger order.
#[derive(Resource, Debug, Default)]
pub struct SeenEvents(pub Vec<SimulationEvent>);

/// Headless app with `DropPlugin` and a recording observer installed.
#[derive(Debug, Clone)]
pub struct DropFixture {
    app: Arc<Mutex<ThreadSafeApp>>,
}

impl DropFixture {
    /// Builds the app around `plugin`.
    pub fn bootstrap(plugin: DropPlugin) -> Self {
        let mut app = drop_app(plugin, FRAME_DT);
        app.init_resource::<SeenEvents>();
        app.add_observer(
            |event: On<SimulationEvent>, mut seen: ResMut<SeenEvents>| {
                seen.0.push(*event.event());
            },
        );
        Self {
            app: Arc::new(Mutex::new(ThreadSafeApp(app))),
        }
    }

    /// Locks the underlying `App`, recovering from a poisoned mutex.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        self.app.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances the application by `frames` updates.
    pub fn tick(&self, frames: usize) {
        let mut app = self.app_guard();
        for _ in 0..frames {
            app.0.update();
        }
    }

    /// Ticks until the run finishes or `max_frames` pass; returns frames used.
    pub fn tick_until_finished(&self, max_frames: usize) -> Option<usize> {
        (1..=max_frames).find(|_| {
            self.tick(1);
            self.phase() == Phase::Finished
        })
    }

    /// Queues a control for the next update.
    pub fn send(&self, control: Control) {
        send_control(&mut self.app_guard().0, control);
    }

    /// Current simulation phase.
    pub fn phase(&self) -> Phase {
        state(&self.app_guard().0).simulation.phase()
    }

    /// Simulated seconds since the run started.
    pub fn elapsed(&self) -> f64 {
        state(&self.app_guard().0).simulation.elapsed()
    }

    /// Terminal timings, once finished.
    pub fn summary(&self) -> Option<RunSummary> {
        state(&self.app_guard().0).simulation.summary()
    }

    /// Height of the ball above the floor in metres.
    pub fn height(&self) -> f64 {
        state(&self.app_guard().0).simulation.height_above_floor()
    }

    /// Copy of every recorded simulation event.
    pub fn seen_events(&self) -> Vec<SimulationEvent> {
        self.app_guard().0.world().resource::<SeenEvents>().0.clone()
    }

    /// Whether an `AppExit` message has been written.
    pub fn exit_requested(&self) -> bool {
        self.app_guard().0.should_exit().is_some()
    }
}

/// Runs an rspec suite serially so ticks never interleave.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
