//! Tree walker: enumerates Go source files below a project root.

use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::PolicyConfig;
use crate::error::{PolicyError, PolicyResult};

/// A Go file found by the walker, identified by its path relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    /// Relative path with `/` separators, e.g. `internal/policy/golang.go`.
    pub path: String,
}

impl SourceFile {
    /// Basename of the file (`golang.go`).
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Relative directory of the file, empty for files at the root.
    pub fn dir(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    /// Relative path of a sibling file in the same directory.
    pub fn sibling(&self, file_name: &str) -> String {
        match self.dir() {
            "" => file_name.to_string(),
            dir => format!("{dir}/{file_name}"),
        }
    }

    /// Location of the file on disk for a given root.
    pub fn on_disk(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    pub fn is_test(&self) -> bool {
        self.path.ends_with("_test.go")
    }
}

/// Whether a relative path names a Go source file the checks care about.
///
/// Generated protobuf code (`.pb.go`) is never yielded.
pub fn is_go_source(path: &str) -> bool {
    path.ends_with(".go") && !path.ends_with(".pb.go")
}

/// Lazily walk `root`, yielding every Go file outside pruned directories.
///
/// Entries are visited in file-name order within each directory. The first
/// unreadable entry is yielded as [`PolicyError::Walk`]; callers using `?`
/// abort the walk there.
pub fn walk_go_files<'a>(
    root: &'a Path,
    config: &'a PolicyConfig,
) -> impl Iterator<Item = PolicyResult<SourceFile>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, config))
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_dir() {
                    return None;
                }
                let rel = relative_path(root, entry.path())?;
                is_go_source(&rel).then_some(Ok(SourceFile { path: rel }))
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                Some(Err(PolicyError::Walk { path, source: err }))
            }
        })
}

/// Collect [`walk_go_files`] eagerly, stopping at the first walk error.
pub fn collect_go_files(root: &Path, config: &PolicyConfig) -> PolicyResult<Vec<SourceFile>> {
    walk_go_files(root, config).collect()
}

fn is_pruned(entry: &DirEntry, config: &PolicyConfig) -> bool {
    // The root itself is always walked, whatever its name.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().map(|name| config.is_pruned_dir(name)).unwrap_or(false)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
