use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::CoverageError;

/// Environment variable naming the `go` binary to run.
pub const GO_BIN_ENV: &str = "YAKE_GO_BIN";

/// What the coverage loader needs back from one runner invocation.
///
/// The profile itself is written by the runner to the path it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerOutput {
    pub stdout: String,
}

/// Trait implemented by test runners that can emit a line-range coverage profile.
pub trait CoverageRunner {
    /// Short name for log lines and error messages.
    fn name(&self) -> &str;

    /// Run the project's tests under `root`, writing the profile to `profile_path`.
    fn run(&self, root: &Path, profile_path: &Path) -> Result<RunnerOutput, CoverageError>;
}

/// Shells out to `go test -cover -coverprofile=<path> ./...`.
///
/// stderr is passed through to the terminal; stdout is captured for the
/// per-package summary lines.
#[derive(Debug, Clone)]
pub struct GoTestRunner {
    pub go_bin: PathBuf,
}

impl GoTestRunner {
    pub fn new(go_bin: impl Into<PathBuf>) -> Self {
        Self { go_bin: go_bin.into() }
    }

    /// Resolve the binary from `YAKE_GO_BIN`, falling back to `go` on `PATH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(GO_BIN_ENV).map(PathBuf::from).unwrap_or_else(|| "go".into()))
    }

    /// Arguments passed to the runner for a given profile sink.
    pub fn args(profile_path: &Path) -> Vec<OsString> {
        let mut profile_flag = OsString::from("-coverprofile=");
        profile_flag.push(profile_path);
        vec!["test".into(), "-cover".into(), profile_flag, "./...".into()]
    }
}

impl Default for GoTestRunner {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CoverageRunner for GoTestRunner {
    fn name(&self) -> &str {
        "go test"
    }

    fn run(&self, root: &Path, profile_path: &Path) -> Result<RunnerOutput, CoverageError> {
        let runner = self.go_bin.display().to_string();
        let args = Self::args(profile_path);
        tracing::debug!(runner = %runner, ?args, root = %root.display(), "spawning test runner");

        let output = Command::new(&self.go_bin)
            .args(&args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| CoverageError::Spawn { runner: runner.clone(), source })?;

        if !output.status.success() {
            return Err(CoverageError::Runner { runner, status: output.status });
        }

        Ok(RunnerOutput { stdout: String::from_utf8_lossy(&output.stdout).to_string() })
    }
}
