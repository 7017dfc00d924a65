use std::path::Path;

use crate::config::PolicyConfig;
use crate::directive::has_skip_directive;
use crate::error::PolicyResult;
use crate::inspector::inspect_file;
use crate::model::Violation;
use crate::walker::{walk_go_files, SourceFile};

/// Test-file suffixes that are rejected outright.
pub const INVALID_TEST_SUFFIXES: &[&str] =
    &["_unit_test.go", "_bench_test.go", "_integration_test.go"];

const E2E_TEST_SUFFIX: &str = "_e2e_test.go";
const TEST_SUFFIX: &str = "_test.go";

/// Check test-file naming discipline for every Go file under `root`.
///
/// All violations are collected; only a walk failure aborts the check.
pub fn naming_check(root: &Path, config: &PolicyConfig) -> PolicyResult<Vec<Violation>> {
    tracing::info!("Checking test file naming conventions...");

    let mut violations = Vec::new();
    for file in walk_go_files(root, config) {
        let file = file?;
        if file.is_test() {
            violations.extend(validate_test_file(root, &file, config));
        } else {
            violations.extend(validate_source_file(root, &file, config));
        }
    }
    Ok(violations)
}

/// Source file name a test file is expected to pair with.
///
/// `handler_e2e_test.go` and `handler_test.go` both pair with `handler.go`.
pub fn expected_source_name(test_file_name: &str) -> String {
    let base = test_file_name
        .strip_suffix(E2E_TEST_SUFFIX)
        .or_else(|| test_file_name.strip_suffix(TEST_SUFFIX))
        .unwrap_or(test_file_name);
    format!("{base}.go")
}

/// Test file name a source file is expected to pair with.
pub fn expected_test_name(source_file_name: &str) -> String {
    let base = source_file_name.strip_suffix(".go").unwrap_or(source_file_name);
    format!("{base}{TEST_SUFFIX}")
}

/// Rules for a `*_test.go` file.
pub fn validate_test_file(root: &Path, file: &SourceFile, config: &PolicyConfig) -> Vec<Violation> {
    let on_disk = file.on_disk(root);
    let Some(summary) = inspect_file(&on_disk) else {
        return Vec::new();
    };
    // An empty test file (build tags, shared vars) is tolerated.
    if !summary.has_any_function() {
        return Vec::new();
    }

    let mut violations = Vec::new();
    let name = file.file_name();

    for suffix in INVALID_TEST_SUFFIXES {
        if name.ends_with(suffix) {
            violations.push(Violation::invalid_naming_pattern(&file.path, suffix));
        }
    }

    let source = file.sibling(&expected_source_name(name));
    if !root.join(&source).exists() {
        violations.push(Violation::missing_source_file(&file.path, &source));
    }

    if !summary.imports_package(&config.testing_import) {
        violations.push(Violation::missing_testing_import(&file.path, &config.testing_import));
    }

    violations
}

/// Rules for a non-test Go file.
pub fn validate_source_file(
    root: &Path,
    file: &SourceFile,
    config: &PolicyConfig,
) -> Vec<Violation> {
    let on_disk = file.on_disk(root);
    let Some(summary) = inspect_file(&on_disk) else {
        return Vec::new();
    };

    let mut violations = Vec::new();

    if summary.imports_package(&config.testing_import) {
        violations.push(Violation::testing_import_in_source(&file.path, &config.testing_import));
    }

    if summary.has_function_longer_than(config.significant_fn_lines) {
        if has_skip_directive(&on_disk, &config.skip_directive) {
            tracing::debug!(path = %file.path, "skip directive present; no test file required");
        } else {
            let test_path = file.sibling(&expected_test_name(file.file_name()));
            if !root.join(&test_path).exists() {
                violations.push(Violation::missing_test_file(&file.path, &test_path));
            }
        }
    }

    violations
}
