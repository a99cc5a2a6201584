//! Presentation layer plugin owning the camera, the ball sprite and the text
//! readouts.
//!
//! `PresentationPlugin` is a passive observer of [`SimulationState`]: it maps
//! the ball's screen-space position into world space and rewrites the readout
//! strings after the simulation has advanced. Keyboard input is translated
//! into [`Control`](crate::Control)s and queued on the [`ControlInbox`].

use bevy::prelude::*;
use glam::DVec2;

use crate::constants::{BALL_PIXEL_RADIUS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::numeric::{expect_f32, screen_to_world};
use crate::plugin::{control_for_keys, ControlInbox, DropSystems, KeyPresses, SimulationState};
use crate::readout::Readout;

/// Marker component for the main presentation camera.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraController;

/// Marker component for the falling ball.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallSprite;

/// Which readout string a text entity displays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutLabel {
    /// Phase prompt in the top-left corner.
    Hint,
    /// Launch mass below the prompt.
    Mass,
    /// Launch height below the mass.
    DropHeight,
    /// Clock or result line in the top-right corner.
    Time,
    /// Vertical velocity next to the ball.
    Velocity,
    /// Height above the floor next to the ball.
    Height,
}

impl ReadoutLabel {
    /// Every label, in spawn order.
    pub const ALL: [Self; 6] = [
        Self::Hint,
        Self::Mass,
        Self::DropHeight,
        Self::Time,
        Self::Velocity,
        Self::Height,
    ];

    /// Picks this label's string out of a readout.
    #[must_use]
    pub fn select(self, readout: &Readout) -> &str {
        match self {
            Self::Hint => readout.hint,
            Self::Mass => &readout.mass,
            Self::DropHeight => &readout.drop_height,
            Self::Time => &readout.time,
            Self::Velocity => &readout.velocity,
            Self::Height => &readout.height,
        }
    }

    /// Screen position of the label; labels next to the ball follow `ball`.
    #[must_use]
    pub fn anchor(self, ball: DVec2) -> DVec2 {
        const BALL_OFFSET: f64 = 110.0;
        match self {
            Self::Hint => DVec2::new(320.0, 30.0),
            Self::Mass => DVec2::new(120.0, 60.0),
            Self::DropHeight => DVec2::new(120.0, 90.0),
            Self::Time => DVec2::new(WINDOW_WIDTH - 220.0, 30.0),
            Self::Velocity => ball + DVec2::new(BALL_OFFSET, -12.0),
            Self::Height => ball + DVec2::new(BALL_OFFSET, 12.0),
        }
    }
}

/// Window size used for the screen-to-world mapping.
#[must_use]
pub const fn window_size() -> DVec2 {
    DVec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)
}

/// Spawns the presentation camera at startup if no camera exists.
fn camera_setup(mut commands: Commands, cameras: Query<&Camera2d>) {
    if cameras.is_empty() {
        commands.spawn((Camera2d, CameraController, Name::new("PresentationCamera")));
    }
}

/// Spawns the ball, the floor line and one text entity per readout.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn spawn_scene(mut commands: Commands, state: Res<SimulationState>) {
    let sim = &state.simulation;
    let ball = sim.body().position();
    let diameter = expect_f32(BALL_PIXEL_RADIUS * 2.0);
    commands.spawn((
        BallSprite,
        Name::new("Ball"),
        Sprite::from_color(Color::srgb(0.9, 0.2, 0.2), Vec2::splat(diameter)),
        Transform::from_translation(screen_to_world(ball, window_size()).extend(1.0)),
    ));

    let floor_top = sim.config().floor_y + BALL_PIXEL_RADIUS;
    commands.spawn((
        Name::new("Floor"),
        Sprite::from_color(
            Color::srgb(0.6, 0.6, 0.6),
            Vec2::new(expect_f32(WINDOW_WIDTH), 2.0),
        ),
        Transform::from_translation(
            screen_to_world(DVec2::new(WINDOW_WIDTH / 2.0, floor_top), window_size()).extend(0.0),
        ),
    ));

    let readout = Readout::capture(sim, &state.launch);
    for label in ReadoutLabel::ALL {
        let position = screen_to_world(label.anchor(ball), window_size());
        commands.spawn((
            label,
            Text2d::new(label.select(&readout)),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_translation(position.extend(2.0)),
        ));
    }
}

/// Moves the ball sprite to the simulated position.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_ball_system(
    state: Res<SimulationState>,
    mut balls: Query<&mut Transform, With<BallSprite>>,
) {
    let Ok(mut transform) = balls.single_mut() else {
        return;
    };
    let world = screen_to_world(state.simulation.body().position(), window_size());
    transform.translation.x = world.x;
    transform.translation.y = world.y;
}

/// Rewrites every readout and keeps the ball-side labels next to the ball.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_readouts_system(
    state: Res<SimulationState>,
    mut labels: Query<(&ReadoutLabel, &mut Text2d, &mut Transform)>,
) {
    let readout = Readout::capture(&state.simulation, &state.launch);
    let ball = state.simulation.body().position();
    for (label, mut text, mut transform) in &mut labels {
        let value = label.select(&readout);
        if text.0 != value {
            value.clone_into(&mut text.0);
        }
        let world = screen_to_world(label.anchor(ball), window_size());
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

/// Queues the control matching this frame's key presses.
///
/// Enter and numpad Enter both start or resume; Digit 0 and numpad 0 both
/// reset.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn keyboard_controls_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<SimulationState>,
    mut inbox: ResMut<ControlInbox>,
) {
    let presses = KeyPresses {
        enter: keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]),
        backspace: keyboard.just_pressed(KeyCode::Backspace),
        digit0: keyboard.any_just_pressed([KeyCode::Digit0, KeyCode::Numpad0]),
        escape: keyboard.just_pressed(KeyCode::Escape),
    };
    if let Some(control) = control_for_keys(presses, state.simulation.phase()) {
        inbox.push(control);
    }
}

/// Plugin owning camera setup and presentation layer systems.
///
/// Requires [`DropPlugin`](crate::DropPlugin) to be added first, since the
/// scene is built from its [`SimulationState`]. Without that resource, for
/// example after a failed setup, every presentation system is skipped.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        let has_simulation = resource_exists::<SimulationState>;
        app.add_systems(
            Startup,
            (camera_setup, spawn_scene).run_if(has_simulation),
        );
        app.add_systems(
            Update,
            keyboard_controls_system
                .before(DropSystems)
                .run_if(has_simulation),
        );
        app.add_systems(
            Update,
            (sync_ball_system, sync_readouts_system)
                .after(DropSystems)
                .run_if(has_simulation),
        );
    }
}
