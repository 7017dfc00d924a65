//! Coverage profile loader.
//!
//! Runs the test runner once with a temporary profile sink, then parses:
//! - the runner's stdout into per-package [`PackageCoverage`] summaries;
//! - the profile file into a [`CoverageProfile`] keyed by repo-relative path.
//!
//! The temporary profile is a [`ProfileSink`]: removed when the loader
//! returns, whether it succeeded or not, and registered so an interrupted run
//! can remove it too (see [`remove_active_profiles`]).

pub mod runner;
pub mod sink;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoverageError;
use crate::model::{CoverageBlock, FunctionRecord, PackageCoverage};

pub use runner::{CoverageRunner, GoTestRunner, RunnerOutput, GO_BIN_ENV};
pub use sink::{active_profiles, remove_active_profiles, ProfileSink};

fn summary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"ok\s+(\S+)\s+(?:[\d.]+s|\(cached\))\s+coverage:\s+([\d.]+)%")
            .expect("summary regex is valid")
    })
}

fn no_tests_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\?\s+(\S+)\s+\[no test files\]").expect("regex is valid"))
}

fn profile_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+):(\d+)\.(\d+),(\d+)\.(\d+) (\d+) (\d+)$").expect("profile regex is valid")
    })
}

/// Parse `go test -cover` stdout into per-package summaries.
///
/// Recognises `ok <pkg> <duration|(cached)> coverage: <pct>% ...` and
/// `? <pkg> [no test files]`; every other line is ignored, as is any
/// percentage that does not parse.
pub fn parse_summary(output: &str) -> Vec<PackageCoverage> {
    let mut packages = Vec::new();
    for line in output.lines() {
        if let Some(caps) = summary_regex().captures(line) {
            match caps[2].parse::<f64>() {
                Ok(percent) => packages.push(PackageCoverage::covered(&caps[1], percent)),
                Err(_) => continue,
            }
        } else if let Some(caps) = no_tests_regex().captures(line) {
            packages.push(PackageCoverage::no_test_files(&caps[1]));
        }
    }
    packages
}

/// Coverage blocks grouped by repo-relative file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageProfile {
    blocks: HashMap<String, Vec<CoverageBlock>>,
}

impl CoverageProfile {
    pub fn insert(&mut self, file: impl Into<String>, block: CoverageBlock) {
        self.blocks.entry(file.into()).or_default().push(block);
    }

    /// Blocks recorded for `file`, in profile order.
    pub fn blocks(&self, file: &str) -> &[CoverageBlock] {
        self.blocks.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Files with at least one block, sorted.
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        files.sort_unstable();
        files
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// A function counts as covered when a hit block starts inside its brace lines.
    pub fn covers(&self, file: &str, function: &FunctionRecord) -> bool {
        self.blocks(file).iter().any(|b| b.is_hit() && function.contains_line(b.start_line))
    }
}

/// Parse a `-coverprofile` file.
///
/// The leading `mode:` line and anything not shaped like
/// `<file>:<sL>.<sC>,<eL>.<eC> <stmts> <count>` is skipped. When `module_path`
/// is non-empty, a `<module_path>/` prefix is stripped from each file name.
pub fn parse_profile(contents: &str, module_path: &str) -> CoverageProfile {
    let prefix = (!module_path.is_empty()).then(|| format!("{module_path}/"));
    let mut profile = CoverageProfile::default();

    for line in contents.lines() {
        let line = line.trim_end();
        if line.starts_with("mode:") {
            continue;
        }
        let Some(caps) = profile_line_regex().captures(line) else {
            continue;
        };
        let Some(block) = parse_block(&caps) else {
            continue;
        };

        let file = &caps[1];
        let file = match &prefix {
            Some(prefix) => file.strip_prefix(prefix.as_str()).unwrap_or(file),
            None => file,
        };
        profile.insert(file, block);
    }
    profile
}

fn parse_block(caps: &regex::Captures<'_>) -> Option<CoverageBlock> {
    let start_line = caps[2].parse().ok()?;
    let end_line: usize = caps[4].parse().ok()?;
    Some(CoverageBlock {
        start_line,
        start_col: caps[3].parse().ok()?,
        end_line: end_line.max(start_line),
        end_col: caps[5].parse().ok()?,
        statements: caps[6].parse().ok()?,
        count: caps[7].parse().ok()?,
    })
}

/// Summary and profile from one runner invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub packages: Vec<PackageCoverage>,
    pub profile: CoverageProfile,
}

/// Run `runner` against `root` and parse both of its artifacts.
pub fn load_coverage(
    root: &Path,
    module_path: &str,
    runner: &dyn CoverageRunner,
) -> Result<CoverageReport, CoverageError> {
    let profile_file = ProfileSink::create()?;

    let output = runner.run(root, profile_file.path())?;
    let contents = fs::read_to_string(profile_file.path()).map_err(CoverageError::ReadProfile)?;

    let report = CoverageReport {
        packages: parse_summary(&output.stdout),
        profile: parse_profile(&contents, module_path),
    };
    tracing::debug!(
        runner = runner.name(),
        packages = report.packages.len(),
        files = report.profile.files().len(),
        "coverage loaded"
    );
    Ok(report)
}
