use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use yake_core::coverage::remove_active_profiles;

pub mod commands;

/// Canonicalize the root path if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(root: &str) -> Result<PathBuf> {
    let path = Path::new(root);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Exit status used when the run is interrupted (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// On SIGINT or SIGTERM, delete any temporary coverage profile and exit.
///
/// A killed process never runs destructors, so the profile sink would
/// otherwise be left behind in the temp directory.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        let removed = remove_active_profiles();
        tracing::warn!(removed, "Interrupted; removed temporary coverage profiles");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("Failed to install interrupt handler")
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `info` filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
