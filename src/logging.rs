//! Tracing subscriber setup

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a default filter directive
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` overrides the verbosity-derived level. With `log_file` set, events
/// go to that file; otherwise they go to stderr. Calling this twice is harmless.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // try_init fails only if a subscriber is already installed
    let _ = match log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    Ok(())
}
