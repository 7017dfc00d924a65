//! Source inspector: syntactic predicates over a single Go file.
//!
//! Files are parsed with tree-sitter's Go grammar. Anything that cannot be
//! read or parsed cleanly answers "nothing interesting here" (`false` or an
//! empty list); the Go toolchain is the authority on syntax errors, not us.

use std::fs;
use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::config::PolicyConfig;
use crate::model::FunctionRecord;

/// Everything the checks need to know about one Go file, from a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Unquoted import paths in declaration order.
    pub imports: Vec<String>,
    /// Top-level `func` declarations, with or without a body.
    pub declared_functions: usize,
    /// Functions and methods that have a body.
    pub functions: Vec<FunctionRecord>,
}

impl SourceSummary {
    pub fn imports_package(&self, import: &str) -> bool {
        self.imports.iter().any(|i| i == import)
    }

    pub fn has_any_function(&self) -> bool {
        self.declared_functions > 0
    }

    /// Whether any function body is strictly longer than `threshold` lines.
    pub fn has_function_longer_than(&self, threshold: usize) -> bool {
        self.functions.iter().any(|f| f.length > threshold)
    }

    /// Functions whose body is strictly longer than `threshold` lines.
    pub fn functions_longer_than(&self, threshold: usize) -> Vec<FunctionRecord> {
        self.functions.iter().filter(|f| f.length > threshold).cloned().collect()
    }
}

/// Parse Go source text. Returns `None` when the grammar reports any syntax error.
pub fn parse_source(source: &str) -> Option<SourceSummary> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into()).ok()?;
    let tree = parser.parse(source, None)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let src = source.as_bytes();
    let mut summary = SourceSummary::default();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "import_declaration" => collect_imports(node, src, &mut summary.imports),
            "function_declaration" | "method_declaration" => {
                summary.declared_functions += 1;
                if let Some(record) = function_record(node, src) {
                    summary.functions.push(record);
                }
            }
            _ => {}
        }
    }
    Some(summary)
}

/// Read and parse a file. Unreadable or unparseable files yield `None`.
pub fn inspect_file(path: &Path) -> Option<SourceSummary> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };
    let summary = parse_source(&source);
    if summary.is_none() {
        tracing::debug!(path = %path.display(), "skipping file that does not parse");
    }
    summary
}

/// Per-file predicates parameterised by the policy thresholds.
#[derive(Debug, Clone, Copy)]
pub struct SourceInspector<'a> {
    config: &'a PolicyConfig,
}

impl<'a> SourceInspector<'a> {
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self { config }
    }

    /// True iff the file imports the testing package.
    pub fn imports_test_package(&self, path: &Path) -> bool {
        inspect_file(path).map(|s| s.imports_package(&self.config.testing_import)).unwrap_or(false)
    }

    /// True iff the file declares at least one top-level function.
    pub fn has_any_function(&self, path: &Path) -> bool {
        inspect_file(path).map(|s| s.has_any_function()).unwrap_or(false)
    }

    /// True iff some function body exceeds the significant-function threshold.
    pub fn has_significant_function(&self, path: &Path) -> bool {
        inspect_file(path)
            .map(|s| s.has_function_longer_than(self.config.significant_fn_lines))
            .unwrap_or(false)
    }

    /// Every function whose body exceeds the large-function threshold.
    pub fn large_functions(&self, path: &Path) -> Vec<FunctionRecord> {
        inspect_file(path)
            .map(|s| s.functions_longer_than(self.config.large_fn_lines))
            .unwrap_or_default()
    }
}

fn collect_imports(node: Node<'_>, src: &[u8], out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                if let Some(path) =
                    child.child_by_field_name("path").and_then(|p| p.utf8_text(src).ok())
                {
                    out.push(path.trim_matches(|c| c == '"' || c == '`').to_string());
                }
            }
            "import_spec_list" => collect_imports(child, src, out),
            _ => {}
        }
    }
}

fn function_record(node: Node<'_>, src: &[u8]) -> Option<FunctionRecord> {
    // Declarations without a body (assembly-backed or linkname'd) are skipped.
    let body = node.child_by_field_name("body")?;
    let name = node.child_by_field_name("name")?.utf8_text(src).ok()?;

    let qualified = match node.child_by_field_name("receiver").and_then(|r| receiver_type(r, src)) {
        Some(receiver) => format!("{receiver}_{name}"),
        None => name.to_string(),
    };

    let start = body.start_position().row + 1;
    let end = body.end_position().row + 1;
    Some(FunctionRecord::new(qualified, start, end))
}

/// Bare type name of a method receiver: `(s *Server)`, `(Server)` and `(s *Set[T])`
/// yield `Server`, `Server` and `Set`.
fn receiver_type(receiver: Node<'_>, src: &[u8]) -> Option<String> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|child| child.kind() == "parameter_declaration")?;
    base_type_name(param.child_by_field_name("type")?, src)
}

fn base_type_name(node: Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => node.utf8_text(src).ok().map(str::to_string),
        "pointer_type" | "parenthesized_type" => {
            node.named_child(0).and_then(|inner| base_type_name(inner, src))
        }
        "generic_type" => node.child_by_field_name("type").and_then(|t| base_type_name(t, src)),
        _ => None,
    }
}
