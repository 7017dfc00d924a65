//! Shared fixtures for policy tests: scratch Go trees and a canned coverage runner.
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use yake_core::coverage::{CoverageRunner, RunnerOutput};
use yake_core::CoverageError;

pub const VALID_TEST_FILE: &str = "package test\n\nimport \"testing\"\n\nfunc TestExample(t *testing.T) {}\n";

pub const TEST_FILE_WITHOUT_TESTING_IMPORT: &str = "package test\n\nfunc TestExample() {}\n";

pub const TEST_FILE_WITHOUT_FUNCTIONS: &str =
    "package test\n\nimport \"testing\"\n\nvar _ = testing.T{}\n";

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}

/// `func <name>() {` followed by `lines` body lines and a closing brace.
pub fn large_func(name: &str, lines: usize) -> String {
    let mut out = format!("func {name}() {{\n");
    for i in 0..lines {
        out.push_str(&format!("\t_ = {i}\n"));
    }
    out.push_str("}\n");
    out
}

/// Method variant of [`large_func`] with a pointer receiver.
pub fn large_method(type_name: &str, method: &str, lines: usize) -> String {
    let mut out = format!("func (t *{type_name}) {method}() {{\n");
    for i in 0..lines {
        out.push_str(&format!("\t_ = {i}\n"));
    }
    out.push_str("}\n");
    out
}

/// Runner that writes a canned profile and returns canned stdout.
#[derive(Default)]
pub struct FakeRunner {
    pub stdout: String,
    pub profile: String,
    pub fail: bool,
    pub profile_path: RefCell<Option<PathBuf>>,
}

impl FakeRunner {
    pub fn new(stdout: &str, profile: &str) -> Self {
        Self { stdout: stdout.to_string(), profile: profile.to_string(), ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// Profile path handed to the last `run` call.
    pub fn last_profile_path(&self) -> Option<PathBuf> {
        self.profile_path.borrow().clone()
    }
}

impl CoverageRunner for FakeRunner {
    fn name(&self) -> &str {
        "fake"
    }

    fn run(&self, _root: &Path, profile_path: &Path) -> Result<RunnerOutput, CoverageError> {
        *self.profile_path.borrow_mut() = Some(profile_path.to_path_buf());
        if self.fail {
            return Err(CoverageError::Spawn {
                runner: "fake".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "fake runner unavailable"),
            });
        }
        fs::write(profile_path, &self.profile).expect("write fake profile");
        Ok(RunnerOutput { stdout: self.stdout.clone() })
    }
}
