//! Temporary coverage profile files.
//!
//! Every live [`ProfileSink`] is recorded in a process-wide registry so that a
//! frontend interrupted mid-run (SIGINT, SIGTERM) can delete the files before
//! exiting; destructors do not run when the process is torn down by a signal.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;

use crate::error::CoverageError;

static ACTIVE: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

fn active() -> MutexGuard<'static, Vec<PathBuf>> {
    ACTIVE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A uniquely named profile file, deleted on drop.
#[derive(Debug)]
pub struct ProfileSink {
    file: NamedTempFile,
}

impl ProfileSink {
    /// Create `yake-coverage-*.out` in the system temp directory and register it.
    pub fn create() -> Result<Self, CoverageError> {
        let file = tempfile::Builder::new()
            .prefix("yake-coverage-")
            .suffix(".out")
            .tempfile()
            .map_err(CoverageError::TempFile)?;
        active().push(file.path().to_path_buf());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ProfileSink {
    fn drop(&mut self) {
        let path = self.file.path();
        active().retain(|p| p != path);
        // The file itself is removed when `self.file` drops.
    }
}

/// Paths of the profile sinks currently alive in this process.
pub fn active_profiles() -> Vec<PathBuf> {
    active().clone()
}

/// Delete every registered profile file and clear the registry.
///
/// Meant for signal handlers that are about to exit the process. Returns the
/// number of files actually removed.
pub fn remove_active_profiles() -> usize {
    let paths: Vec<PathBuf> = active().drain(..).collect();
    paths.into_iter().filter(|path| fs::remove_file(path).is_ok()).count()
}
