use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while producing or reading a coverage profile.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("failed to create temp file: {0}")]
    TempFile(#[source] std::io::Error),

    /// The runner binary could not be started at all.
    #[error("failed to run coverage check: could not spawn {runner}: {source}")]
    Spawn {
        runner: String,
        #[source]
        source: std::io::Error,
    },

    /// The runner started but exited unsuccessfully.
    #[error("failed to run coverage check: {runner} exited with {status}")]
    Runner { runner: String, status: ExitStatus },

    #[error("failed to read coverage profile: {0}")]
    ReadProfile(#[source] std::io::Error),
}

/// Errors that abort a single policy check.
///
/// Violations are never errors; they are returned as data.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A directory entry could not be read during traversal.
    #[error("failed to walk directory: {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// `go.mod` exists but could not be read.
    #[error("failed to read go.mod: {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

/// Convenience result type for policy checks.
pub type PolicyResult<T> = Result<T, PolicyError>;
