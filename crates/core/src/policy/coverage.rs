use std::path::Path;

use crate::config::PolicyConfig;
use crate::coverage::{load_coverage, CoverageProfile, CoverageRunner};
use crate::directive::has_skip_directive;
use crate::error::PolicyResult;
use crate::inspector::SourceInspector;
use crate::manifest::read_module_path;
use crate::model::{CoverageStatus, PackageCoverage, Violation};
use crate::walker::walk_go_files;

/// Check per-package coverage and large-function reachability.
///
/// Package violations come first, followed by uncovered large functions in walk order.
pub fn coverage_check(
    root: &Path,
    config: &PolicyConfig,
    runner: &dyn CoverageRunner,
) -> PolicyResult<Vec<Violation>> {
    tracing::info!(
        "Checking code coverage (minimum {:.0}% per package)...",
        config.min_coverage
    );

    let module_path = read_module_path(root)?;
    let report = load_coverage(root, &module_path, runner)?;

    let mut violations = package_violations(&report.packages, config.min_coverage);
    violations.extend(uncovered_large_functions(root, &report.profile, config)?);
    Ok(violations)
}

/// Packages under `minimum` percent, and packages without tests.
pub fn package_violations(packages: &[PackageCoverage], minimum: f64) -> Vec<Violation> {
    packages
        .iter()
        .filter_map(|pkg| match pkg.status {
            CoverageStatus::Covered { percent } if percent < minimum => {
                Some(Violation::low_coverage(&pkg.package, percent, minimum))
            }
            CoverageStatus::Covered { .. } => None,
            CoverageStatus::NoTestFiles => Some(Violation::no_test_files(&pkg.package)),
        })
        .collect()
}

/// Large functions in non-test, non-generated files that no hit block reaches.
pub fn uncovered_large_functions(
    root: &Path,
    profile: &CoverageProfile,
    config: &PolicyConfig,
) -> PolicyResult<Vec<Violation>> {
    let inspector = SourceInspector::new(config);
    let mut violations = Vec::new();

    for file in walk_go_files(root, config) {
        let file = file?;
        if file.is_test() {
            continue;
        }
        let on_disk = file.on_disk(root);
        if has_skip_directive(&on_disk, &config.skip_directive) {
            tracing::debug!(path = %file.path, "skip directive present; coverage not enforced");
            continue;
        }
        for function in inspector.large_functions(&on_disk) {
            if !profile.covers(&file.path, &function) {
                violations.push(Violation::uncovered_function(&file.path, &function));
            }
        }
    }
    Ok(violations)
}
