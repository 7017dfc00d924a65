use serde::{Deserialize, Serialize};

/// Body-interior line count a function must exceed to require a paired test file.
pub const SIGNIFICANT_FN_LINES: usize = 5;

/// Body-interior line count a function must exceed to require test coverage of its own.
pub const LARGE_FN_LINES: usize = 25;

/// Minimum per-package statement coverage, in percent.
pub const MIN_COVERAGE: f64 = 80.0;

/// Comment token that opts a file out of test pairing and large-function coverage.
pub const SKIP_DIRECTIVE: &str = "//yake:skip-test";

/// Import path of the Go standard testing package.
pub const TESTING_IMPORT: &str = "testing";

/// Directory basenames the tree walker never descends into.
pub const PRUNED_DIRS: &[&str] = &["vendor", ".git", "test", "tests", "examples"];

/// Thresholds and tokens used by the policy checks.
///
/// `Default` carries the values the CLI enforces. Tests override individual
/// fields to exercise boundaries without touching the checks themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// A function whose body exceeds this many lines makes its file need a `_test.go` twin.
    pub significant_fn_lines: usize,
    /// A function whose body exceeds this many lines must be hit by at least one coverage block.
    pub large_fn_lines: usize,
    /// Packages below this percentage are reported.
    pub min_coverage: f64,
    /// Opt-out directive recognised before the package clause.
    pub skip_directive: String,
    /// Import path that marks a file as test code.
    pub testing_import: String,
    /// Directory basenames pruned from every walk.
    pub pruned_dirs: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            significant_fn_lines: SIGNIFICANT_FN_LINES,
            large_fn_lines: LARGE_FN_LINES,
            min_coverage: MIN_COVERAGE,
            skip_directive: SKIP_DIRECTIVE.to_string(),
            testing_import: TESTING_IMPORT.to_string(),
            pruned_dirs: PRUNED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl PolicyConfig {
    /// Whether a directory basename is excluded from traversal.
    pub fn is_pruned_dir(&self, name: &str) -> bool {
        self.pruned_dirs.iter().any(|d| d == name)
    }
}
