//! yake-core
//!
//! Policy engine for Go projects.
//!
//! This crate walks a project's source tree, inspects Go files at the
//! syntactic level, correlates function bodies with a coverage profile
//! produced by `go test`, and reports every broken rule as a structured
//! violation list.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends; the CLI only renders the report.

pub mod config;
pub mod coverage;
pub mod directive;
pub mod error;
pub mod inspector;
pub mod manifest;
pub mod model;
pub mod policy;
pub mod walker;

pub use config::PolicyConfig;
pub use error::{CoverageError, PolicyError};
pub use model::{Violation, ViolationKind};
pub use policy::{coverage_check, naming_check, run_checks, PolicyReport};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
