use anyhow::{anyhow, Context, Result};

use yake_core::coverage::{CoverageRunner, GoTestRunner};
use yake_core::manifest::has_manifest;
use yake_core::{run_checks, PolicyConfig, PolicyReport};

use crate::canonicalize_or_current;

/// Result of `yake policy run`.
#[derive(Debug)]
pub enum PolicyRunOutcome {
    /// No `go.mod` at the root; nothing was checked.
    Skipped,
    Completed(PolicyReport),
}

impl PolicyRunOutcome {
    /// Whether the command should exit successfully.
    pub fn passed(&self) -> bool {
        match self {
            PolicyRunOutcome::Skipped => true,
            PolicyRunOutcome::Completed(report) => report.is_clean(),
        }
    }
}

/// Run the Go policy checks with the `go` toolchain from the environment.
pub fn policy_run_command(root: &str, json: bool) -> Result<PolicyRunOutcome> {
    policy_run_with_runner(root, json, &PolicyConfig::default(), &GoTestRunner::from_env())
}

/// Run the Go policy checks against `root` using an explicit runner and config.
///
/// Violations are printed to stderr (or as JSON on stdout with `json`); they
/// are reported through the outcome, never as an `Err`. A root that is not an
/// existing directory is an `Err`.
pub fn policy_run_with_runner(
    root: &str,
    json: bool,
    config: &PolicyConfig,
    runner: &dyn CoverageRunner,
) -> Result<PolicyRunOutcome> {
    let root_path = canonicalize_or_current(root)?;
    if !root_path.is_dir() {
        return Err(anyhow!("Project root does not exist: {}", root_path.display()));
    }

    if !has_manifest(&root_path) {
        tracing::info!(root = %root_path.display(), "No go.mod found; skipping Go policy checks");
        tracing::info!("All policy checks passed");
        return Ok(PolicyRunOutcome::Skipped);
    }

    let report = run_checks(&root_path, config, runner);

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize policy report")?;
        println!("{}", serialized);
    } else if !report.is_clean() {
        eprintln!("{}", report.render());
    }

    Ok(PolicyRunOutcome::Completed(report))
}
