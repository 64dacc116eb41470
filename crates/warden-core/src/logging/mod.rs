//! Structured logging with `tracing`.
//!
//! Two subscriber setups:
//! - [`init_subscriber`] writes compact human-readable lines to stderr.
//! - [`init_file_subscriber`] writes to a daily-rolled `warden.*.log` file.
//!
//! Hook processes use the file variant: the host agent reads hook stderr as
//! the block diagnostic, so log lines must not land there.
//!
//! `RUST_LOG` takes precedence over the level passed in. Repeated calls are
//! no-ops once a global subscriber is installed.

use std::io;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log file name prefix inside the log directory.
pub const LOG_FILE_PREFIX: &str = "warden";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global tracing subscriber with stderr output only.
///
/// # Arguments
///
/// * `level` - Minimum log level to display, e.g. `"warn"`.
pub fn init_subscriber(level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_writer(io::stderr)
        .compact();

    // set_global_default is a no-op if already set
    let _ = subscriber.try_init();
}

/// Initialize the global tracing subscriber writing to a rolling file in `dir`.
///
/// The directory is created if missing. Writes are synchronous: hook
/// processes live for milliseconds and a background writer would drop lines
/// at exit.
pub fn init_file_subscriber(level: &str, dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(io::Error::other)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(file_layer)
        .try_init();

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
