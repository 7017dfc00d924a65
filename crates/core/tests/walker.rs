mod support;

use support::write;
use tempfile::tempdir;
use yake_core::walker::{collect_go_files, is_go_source, SourceFile};
use yake_core::{PolicyConfig, PolicyError};

fn walked(root: &std::path::Path) -> Vec<String> {
    let mut paths: Vec<String> = collect_go_files(root, &PolicyConfig::default())
        .expect("walk")
        .into_iter()
        .map(|f| f.path)
        .collect();
    paths.sort();
    paths
}

#[test]
fn yields_relative_forward_slash_paths() {
    let temp = tempdir().unwrap();
    write(temp.path(), "main.go", "package main\n");
    write(temp.path(), "internal/policy/golang.go", "package policy\n");
    write(temp.path(), "internal/policy/golang_test.go", "package policy\n");

    assert_eq!(
        walked(temp.path()),
        vec!["internal/policy/golang.go", "internal/policy/golang_test.go", "main.go"]
    );
}

#[test]
fn prunes_vendor_git_test_tests_and_examples() {
    let temp = tempdir().unwrap();
    for dir in ["vendor/pkg", ".git/hooks", "test", "tests", "examples/demo", "pkg/tests"] {
        write(temp.path(), &format!("{dir}/orphan_test.go"), "package x\n");
    }
    write(temp.path(), "pkg/keep.go", "package pkg\n");

    assert_eq!(walked(temp.path()), vec!["pkg/keep.go"]);
}

#[test]
fn skips_non_go_and_generated_files() {
    let temp = tempdir().unwrap();
    write(temp.path(), "readme.md", "# Test");
    write(temp.path(), "config.yaml", "key: value");
    write(temp.path(), "api/service.pb.go", "package api\n");
    write(temp.path(), "api/service.go", "package api\n");

    assert_eq!(walked(temp.path()), vec!["api/service.go"]);
}

#[test]
fn pruned_names_only_apply_to_directories() {
    let temp = tempdir().unwrap();
    write(temp.path(), "vendor.go", "package main\n");
    write(temp.path(), "tests.go", "package main\n");

    assert_eq!(walked(temp.path()), vec!["tests.go", "vendor.go"]);
}

#[test]
fn custom_prune_set_is_honoured() {
    let temp = tempdir().unwrap();
    write(temp.path(), "gen/out.go", "package gen\n");
    write(temp.path(), "vendor/dep.go", "package dep\n");
    let config = PolicyConfig { pruned_dirs: vec!["gen".into()], ..PolicyConfig::default() };

    let paths: Vec<String> =
        collect_go_files(temp.path(), &config).unwrap().into_iter().map(|f| f.path).collect();
    assert_eq!(paths, vec!["vendor/dep.go"]);
}

#[test]
fn missing_root_fails_with_walk_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("does-not-exist");

    let err = collect_go_files(&missing, &PolicyConfig::default()).unwrap_err();
    assert!(matches!(err, PolicyError::Walk { .. }), "unexpected error: {err:?}");
    assert!(err.to_string().contains("failed to walk directory"));
}

#[test]
fn source_file_helpers_split_paths() {
    let nested = SourceFile { path: "pkg/service/handler_test.go".into() };
    assert_eq!(nested.file_name(), "handler_test.go");
    assert_eq!(nested.dir(), "pkg/service");
    assert_eq!(nested.sibling("handler.go"), "pkg/service/handler.go");
    assert!(nested.is_test());

    let top = SourceFile { path: "main.go".into() };
    assert_eq!(top.dir(), "");
    assert_eq!(top.sibling("main_test.go"), "main_test.go");
    assert!(!top.is_test());
}

#[test]
fn go_source_filter() {
    assert!(is_go_source("a/b.go"));
    assert!(is_go_source("b_test.go"));
    assert!(!is_go_source("b.pb.go"));
    assert!(!is_go_source("b.go.txt"));
}
