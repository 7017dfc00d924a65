//! Data model shared by the inspector, the coverage loader, and the checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A top-level function or method found in a Go source file.
///
/// Lines are 1-based. `start_line` is the line of the body's opening brace and
/// `end_line` the line of its closing brace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// `Name` for functions, `Type_Name` for methods.
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Lines strictly between the braces.
    pub length: usize,
}

impl FunctionRecord {
    pub fn new(name: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        let end_line = end_line.max(start_line);
        Self { name: name.into(), start_line, end_line, length: body_length(start_line, end_line) }
    }

    /// Whether `line` lies inside `[start_line, end_line]`.
    pub fn contains_line(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

/// Number of lines strictly between an opening brace on `start` and a closing brace on `end`.
///
/// A body whose braces sit on lines 10 and 14 has length 3; a one-line body has length 0.
pub fn body_length(start: usize, end: usize) -> usize {
    end.saturating_sub(start).saturating_sub(1)
}

/// One `<file>:<sL>.<sC>,<eL>.<eC> <stmts> <count>` entry of a coverage profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageBlock {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub statements: u64,
    pub count: u64,
}

impl CoverageBlock {
    pub fn is_hit(&self) -> bool {
        self.count > 0
    }
}

/// Per-package coverage as reported on the runner's stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoverageStatus {
    Covered { percent: f64 },
    NoTestFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCoverage {
    /// Package import path exactly as the runner printed it.
    pub package: String,
    #[serde(flatten)]
    pub status: CoverageStatus,
}

impl PackageCoverage {
    pub fn covered(package: impl Into<String>, percent: f64) -> Self {
        Self { package: package.into(), status: CoverageStatus::Covered { percent } }
    }

    pub fn no_test_files(package: impl Into<String>) -> Self {
        Self { package: package.into(), status: CoverageStatus::NoTestFiles }
    }
}

/// Which rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    InvalidNamingPattern,
    MissingSourceFile,
    MissingTestingImport,
    TestingImportInSource,
    MissingTestFile,
    LowCoverage,
    NoTestFiles,
    UncoveredFunction,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::InvalidNamingPattern => "invalid_naming_pattern",
            ViolationKind::MissingSourceFile => "missing_source_file",
            ViolationKind::MissingTestingImport => "missing_testing_import",
            ViolationKind::TestingImportInSource => "testing_import_in_source",
            ViolationKind::MissingTestFile => "missing_test_file",
            ViolationKind::LowCoverage => "low_coverage",
            ViolationKind::NoTestFiles => "no_test_files",
            ViolationKind::UncoveredFunction => "uncovered_function",
        }
    }
}

/// A single broken rule, keyed by file path or package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub subject: String,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, subject: subject.into(), message: message.into() }
    }

    pub fn invalid_naming_pattern(test_path: &str, suffix: &str) -> Self {
        Self::new(
            ViolationKind::InvalidNamingPattern,
            test_path,
            format!(
                "invalid naming pattern '{suffix}', use '{{origin}}_test.go' or '{{origin}}_e2e_test.go'"
            ),
        )
    }

    pub fn missing_source_file(test_path: &str, source_path: &str) -> Self {
        Self::new(
            ViolationKind::MissingSourceFile,
            test_path,
            format!("missing source file '{source_path}'"),
        )
    }

    pub fn missing_testing_import(test_path: &str, import: &str) -> Self {
        Self::new(
            ViolationKind::MissingTestingImport,
            test_path,
            format!("missing '{import}' package import"),
        )
    }

    pub fn testing_import_in_source(source_path: &str, import: &str) -> Self {
        Self::new(
            ViolationKind::TestingImportInSource,
            source_path,
            format!(
                "file imports '{import}' but is not named '{{origin}}_test.go' or '{{origin}}_e2e_test.go'"
            ),
        )
    }

    pub fn missing_test_file(source_path: &str, test_path: &str) -> Self {
        Self::new(
            ViolationKind::MissingTestFile,
            source_path,
            format!("missing test file '{test_path}'"),
        )
    }

    pub fn low_coverage(package: &str, percent: f64, minimum: f64) -> Self {
        Self::new(
            ViolationKind::LowCoverage,
            package,
            format!("{percent:.1}% coverage (minimum {minimum:.0}%)"),
        )
    }

    pub fn no_test_files(package: &str) -> Self {
        Self::new(ViolationKind::NoTestFiles, package, "no test files")
    }

    pub fn uncovered_function(source_path: &str, function: &FunctionRecord) -> Self {
        Self::new(
            ViolationKind::UncoveredFunction,
            source_path,
            format!(
                "function '{}' ({} lines) has no test coverage",
                function.name, function.length
            ),
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
