//! Command line entry point for the gravr drop simulation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use serde::Serialize;

use gravr::{
    init_logging, run_to_completion, BallKind, FixedClock, LaunchParams, PhysicsConfig,
    RunSummary, Simulation,
};

/// Drops a ball under gravity and air drag and times its bounces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Ball mass in kilograms; invalid values fall back to 0.056
    #[arg(short, long)]
    mass: Option<String>,
    /// Drop height in metres; invalid values fall back to 2
    #[arg(long)]
    height: Option<String>,
    /// TOML file overriding the physics constants
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Run without a window and print the result as JSON
    #[arg(long)]
    headless: bool,
    /// Frame length in seconds used by the headless driver
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,
    /// Frames the headless driver may run before giving up
    #[arg(long, default_value_t = 100_000)]
    max_frames: usize,
}

/// Result line written by the headless driver.
#[derive(Debug, Serialize)]
struct Report {
    launch: LaunchParams,
    ball: &'static str,
    summary: RunSummary,
}

fn load_config(path: Option<&Path>) -> Result<PhysicsConfig> {
    let Some(file) = path else {
        return Ok(PhysicsConfig::default());
    };
    let config = PhysicsConfig::load(file)
        .with_context(|| format!("loading physics config from {}", file.display()))?;
    info!("loaded physics config from {}", file.display());
    Ok(config)
}

fn run_headless(config: PhysicsConfig, launch: LaunchParams, args: &Args) -> Result<()> {
    let mut sim = Simulation::new(config, launch.mass, launch.height)?;
    let mut clock = FixedClock::new(args.frame_dt);
    let summary = run_to_completion(&mut sim, &mut clock, args.max_frames)?;
    let report = Report {
        launch,
        ball: BallKind::from_mass(launch.mass).label(),
        summary,
    };
    let json = serde_json::to_string(&report)?;
    writeln!(std::io::stdout().lock(), "{json}")?;
    Ok(())
}

#[cfg(feature = "render")]
fn run_windowed(config: PhysicsConfig, launch: LaunchParams, _args: &Args) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use gravr::{DropPlugin, PresentationPlugin};

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Gravity Simulation".to_owned(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DropPlugin { config, launch })
        .add_plugins(PresentationPlugin)
        .run();
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow::anyhow!("app exited with code {code}")),
    }
}

#[cfg(not(feature = "render"))]
fn run_windowed(config: PhysicsConfig, launch: LaunchParams, args: &Args) -> Result<()> {
    log::warn!("built without the `render` feature, running headless");
    run_headless(config, launch, args)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !init_logging(args.verbose) {
        debug!("logger already installed");
    }

    let config = load_config(args.config.as_deref())?;
    let launch = LaunchParams::from_raw(args.mass.as_deref(), args.height.as_deref());
    info!(
        "dropping a {} ({:.3} kg) from {:.3} m",
        launch.ball_kind().label(),
        launch.mass,
        launch.height
    );

    if args.headless {
        run_headless(config, launch, &args)
    } else {
        run_windowed(config, launch, &args)
    }
}
