//! Remove Tests
//!
//! Tests for removing packages by name or file name, and for the index
//! following the archive set.

use crate::common::*;

#[test]
fn add_then_remove_leaves_nothing() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    assert!(!repo.index_files().is_empty());

    repo.store.remove(BRANCH, ["foo"]).unwrap();

    assert!(repo.store.list(BRANCH).unwrap().is_empty());
    assert_eq!(repo.store.list(BRANCH).unwrap().to_string(), "No entries.");
    assert!(repo.index_files().is_empty());
}

#[test]
fn remove_by_file_name_keeps_other_versions() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    std::fs::write(
        repo.branch_dir().join("foo-0-1-any.pkg.tar.zst"),
        package_bytes("foo-legacy"),
    )
    .unwrap();

    repo.store.remove(BRANCH, ["foo-0-1-any.pkg.tar.zst"]).unwrap();

    assert_eq!(repo.listed(), vec!["foo-1-1-any.pkg.tar.zst"]);
    assert_eq!(repo.indexed(), vec!["foo-1-1-any.pkg.tar.zst"]);
}

#[test]
fn removing_unknown_tokens_changes_nothing() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();
    let before = repo.listed();

    let outcome = repo
        .store
        .remove(BRANCH, ["baz", "qux-1-1-any.pkg.tar.zst"])
        .unwrap();

    assert!(outcome.removed.is_empty());
    assert_eq!(repo.listed(), before);
    assert_eq!(repo.indexed(), before);
}

#[test]
fn mixed_tokens() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();
    repo.add("baz-1-1-any.pkg.tar.zst", "baz").unwrap();

    let outcome = repo
        .store
        .remove(BRANCH, ["foo", "bar-1-1-any.pkg.tar.zst", "missing"])
        .unwrap();

    assert_eq!(outcome.removed.len(), 2);
    assert_eq!(repo.listed(), vec!["baz-1-1-any.pkg.tar.zst"]);
}

#[test]
fn remove_is_not_rolled_back() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();
    repo.tool.set_failing(true);

    let err = repo.store.remove(BRANCH, ["foo"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IndexRebuild);
    assert_eq!(repo.listed(), vec!["bar-1-1-any.pkg.tar.zst"]);

    repo.tool.set_failing(false);
    repo.store.rebuild(BRANCH).unwrap();
    assert_eq!(repo.indexed(), vec!["bar-1-1-any.pkg.tar.zst"]);
}

#[test]
fn remove_from_unknown_branch() {
    let repo = TestRepo::new();
    let err = repo.store.remove("testing", ["foo"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BranchNotFound);
}
