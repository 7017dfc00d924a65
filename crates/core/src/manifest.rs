//! Go module manifest (`go.mod`) lookup.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PolicyError, PolicyResult};

pub const MANIFEST_FILE: &str = "go.mod";

/// Module path declared by the first `module <path>` line, if any.
pub fn parse_module_path(contents: &str) -> Option<String> {
    contents.lines().map(str::trim).find_map(|line| {
        let rest = line.strip_prefix("module ")?;
        // `module "example.com/m" // comment` is legal.
        let path = rest.split("//").next().unwrap_or(rest).trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Read the module path from `<root>/go.mod`.
///
/// A missing manifest yields an empty module path; any other read failure is an error.
pub fn read_module_path(root: &Path) -> PolicyResult<String> {
    let path = root.join(MANIFEST_FILE);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(parse_module_path(&contents).unwrap_or_default()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(PolicyError::Manifest { path, source }),
    }
}

/// Whether `root` is a Go module.
pub fn has_manifest(root: &Path) -> bool {
    root.join(MANIFEST_FILE).is_file()
}
