//! Diagnostic logging setup
//!
//! The terminal belongs to the UI, so log output goes to a file. `RUST_LOG`
//! selects the filter; the default keeps newsdesk at `info`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "newsdesk=info";

/// Builds the filter from `RUST_LOG`, falling back to `DEFAULT_FILTER`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, appending to `log_file`
///
/// Creates the parent directory if needed. Fails if the file cannot be
/// opened; installing twice is silently ignored.
pub fn init(log_file: &Path) -> io::Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    Ok(())
}
