//! Directive scanner: detects the opt-out comment in a file header.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whether the file carries `directive` on a comment line before its package clause.
///
/// Scanning stops at the package clause or at the first line that is neither
/// blank nor a `//` comment, so a matching comment later in the file does not
/// count. Unreadable files answer `false`.
pub fn has_skip_directive(path: &Path, directive: &str) -> bool {
    match File::open(path) {
        Ok(file) => scan_header(BufReader::new(file), directive),
        Err(_) => false,
    }
}

/// Header scan over any line source.
pub fn scan_header<R: BufRead>(reader: R, directive: &str) -> bool {
    for line in reader.lines() {
        let Ok(line) = line else {
            return false;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("package ") {
            return false;
        }
        if !trimmed.starts_with("//") {
            return false;
        }
        if trimmed.starts_with(directive) {
            return true;
        }
    }
    false
}
