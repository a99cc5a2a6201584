//! Logger setup shared by the windowed and headless front ends.
//!
//! Bevy's own `LogPlugin` stays disabled; everything goes through the `log`
//! facade and `env_logger`, so `RUST_LOG` overrides the defaults below.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Render backend crates that are noisy at `info`.
const QUIET_CRATES: [&str; 3] = ["wgpu", "naga", "winit"];

/// Builds the default filter directive used when `RUST_LOG` is unset.
///
/// # Examples
/// ```
/// use gravr::logging::default_filter;
/// assert!(default_filter(true).starts_with("debug"));
/// assert!(default_filter(false).contains("wgpu=warn"));
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    QUIET_CRATES
        .iter()
        .fold(level.to_string().to_lowercase(), |mut directive, name| {
            directive.push_str(&format!(",{name}=warn"));
            directive
        })
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, bounce events and rejected controls are printed
/// at debug level. Otherwise only info level and above are shown.
///
/// Returns `false` if a logger was already installed, which lets tests call
/// this repeatedly.
#[must_use]
pub fn init(verbose: bool) -> bool {
    let env = Env::default().default_filter_or(default_filter(verbose));
    Builder::from_env(env).format_timestamp_millis().try_init().is_ok()
}
