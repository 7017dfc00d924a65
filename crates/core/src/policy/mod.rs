//! Policy orchestrator: composes the naming and coverage checks.
//!
//! Neither check short-circuits on the first violation, and a failure in one
//! check does not stop the other from running. Everything ends up in a single
//! [`PolicyReport`]; an empty report means the project passes.

pub mod coverage;
pub mod naming;

use std::path::Path;

use serde::Serialize;

use crate::config::PolicyConfig;
use crate::coverage::CoverageRunner;
use crate::model::Violation;

pub use coverage::{coverage_check, package_violations, uncovered_large_functions};
pub use naming::{naming_check, validate_source_file, validate_test_file};

/// Aggregated outcome of `policy run`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyReport {
    /// Minimum package coverage the report was produced with.
    pub min_coverage: f64,
    pub naming: Vec<Violation>,
    pub coverage: Vec<Violation>,
    /// Messages of checks that could not complete (walk, manifest, or runner failures).
    pub errors: Vec<String>,
}

impl PolicyReport {
    pub fn new(min_coverage: f64) -> Self {
        Self { min_coverage, ..Self::default() }
    }

    /// True when there are no violations and every check completed.
    pub fn is_clean(&self) -> bool {
        self.naming.is_empty() && self.coverage.is_empty() && self.errors.is_empty()
    }

    /// Naming violations followed by coverage violations.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.naming.iter().chain(self.coverage.iter())
    }

    /// Human-readable block for stderr. Empty when the report is clean.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if !self.naming.is_empty() {
            sections.push(render_section("test file naming violations:", &self.naming));
        }
        if !self.coverage.is_empty() {
            let header = format!("coverage violations (minimum {:.0}%):", self.min_coverage);
            sections.push(render_section(&header, &self.coverage));
        }
        sections.extend(self.errors.iter().cloned());
        sections.join("\n")
    }
}

fn render_section(header: &str, violations: &[Violation]) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(violations.iter().map(|v| format!("  - {v}")));
    lines.join("\n")
}

/// Run the naming check and then the coverage check against `root`.
pub fn run_checks(
    root: &Path,
    config: &PolicyConfig,
    runner: &dyn CoverageRunner,
) -> PolicyReport {
    tracing::info!("Running Go policy checks...");

    let mut report = PolicyReport::new(config.min_coverage);

    match naming_check(root, config) {
        Ok(violations) => report.naming = violations,
        Err(err) => report.errors.push(err.to_string()),
    }

    match coverage_check(root, config, runner) {
        Ok(violations) => report.coverage = violations,
        Err(err) => report.errors.push(err.to_string()),
    }

    if report.is_clean() {
        tracing::info!("All policy checks passed");
    }
    report
}
