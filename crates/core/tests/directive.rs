mod support;

use std::io::Cursor;
use std::path::Path;

use support::write;
use tempfile::tempdir;
use yake_core::config::SKIP_DIRECTIVE;
use yake_core::directive::{has_skip_directive, scan_header};

fn scan(source: &str) -> bool {
    scan_header(Cursor::new(source), SKIP_DIRECTIVE)
}

#[test]
fn directive_before_package_is_honoured() {
    let temp = tempdir().unwrap();
    let path = write(
        temp.path(),
        "main.go",
        "//yake:skip-test\npackage main\n\nfunc main() {\n\tExecute()\n}\n",
    );
    assert!(has_skip_directive(&path, SKIP_DIRECTIVE));
}

#[test]
fn directive_after_other_comments_and_blank_lines() {
    assert!(scan("// Some comment\n\n//yake:skip-test\npackage main\n"));
}

#[test]
fn directive_after_package_is_ignored() {
    assert!(!scan("package main\n\n//yake:skip-test\nfunc main() {}\n"));
}

#[test]
fn no_directive() {
    assert!(!scan("package main\n\nfunc main() {}\n"));
}

#[test]
fn non_comment_line_stops_the_scan() {
    assert!(!scan("/* block */\n//yake:skip-test\npackage main\n"));
}

#[test]
fn directive_with_trailing_text_still_matches() {
    assert!(scan("//yake:skip-test generated wiring\npackage main\n"));
}

#[test]
fn spaced_comment_is_not_the_directive() {
    assert!(!scan("// yake:skip-test\npackage main\n"));
}

#[test]
fn custom_directive_token() {
    assert!(scan_header(Cursor::new("//acme:no-test\npackage x\n"), "//acme:no-test"));
    assert!(!scan_header(Cursor::new("//yake:skip-test\npackage x\n"), "//acme:no-test"));
}

#[test]
fn missing_file_is_not_skipped() {
    assert!(!has_skip_directive(Path::new("/non/existent/file.go"), SKIP_DIRECTIVE));
}
