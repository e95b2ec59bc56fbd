//! Recovery Tests
//!
//! Tests that a failed mutation leaves the branch as it was:
//! - Failing index tool on an empty and on a populated branch
//! - Staging leftovers from an interrupted process are cleaned up

use crate::common::*;
use std::fs;

#[test]
fn failing_tool_on_empty_branch_leaves_it_empty() {
    let repo = TestRepo::failing();

    let err = repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IndexRebuild);
    assert!(repo.files_on_disk().is_empty());
    assert!(repo.store.list(BRANCH).unwrap().is_empty());
}

#[test]
fn failing_tool_restores_superseded_archive_and_index() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();
    let files_before = repo.files_on_disk();
    let index_before = repo.indexed();

    repo.tool.fail_times(1);
    let err = repo.add("foo-2-1-any.pkg.tar.zst", "foo").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IndexRebuild);
    assert_eq!(repo.files_on_disk(), files_before);
    assert_eq!(repo.indexed(), index_before);
}

#[test]
fn failing_tool_restores_overwritten_file() {
    let repo = TestRepo::new();
    repo.add("shared.pkg.tar.zst", "foo").unwrap();

    repo.tool.fail_times(1);
    repo.add("shared.pkg.tar.zst", "bar").unwrap_err();

    let path = repo.branch_dir().join("shared.pkg.tar.zst");
    assert_eq!(arpm::read_package_name(&path).unwrap(), "foo");
    assert_eq!(repo.indexed(), vec!["shared.pkg.tar.zst"]);
}

#[test]
fn stale_staging_files_are_swept() {
    let repo = TestRepo::new();
    let dir = repo.branch_dir();
    fs::write(dir.join(".upload-crashed.part"), b"partial").unwrap();
    // Interrupted after moving foo aside, before the new file landed.
    fs::write(dir.join(".foo-1-1-any.pkg.tar.zst.superseded"), package_bytes("foo")).unwrap();

    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();

    assert_eq!(
        repo.listed(),
        vec!["bar-1-1-any.pkg.tar.zst", "foo-1-1-any.pkg.tar.zst"]
    );
    assert_eq!(
        repo.indexed(),
        vec!["bar-1-1-any.pkg.tar.zst", "foo-1-1-any.pkg.tar.zst"]
    );
    assert!(repo.files_on_disk().iter().all(|name| !name.starts_with('.')));
}

#[test]
fn staging_files_are_never_listed() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();
    fs::write(repo.branch_dir().join(".upload-x.part"), b"partial").unwrap();

    assert_eq!(repo.listed(), vec!["foo-1-1-any.pkg.tar.zst"]);
}

#[test]
fn backup_left_after_commit_is_dropped() {
    let repo = TestRepo::new();
    repo.add("foo-2-1-any.pkg.tar.zst", "foo").unwrap();
    // Interrupted after the new foo landed, before its predecessor was deleted.
    fs::write(
        repo.branch_dir().join(".foo-1-1-any.pkg.tar.zst.superseded"),
        package_bytes("foo"),
    )
    .unwrap();

    repo.add("bar-1-1-any.pkg.tar.zst", "bar").unwrap();

    assert_eq!(
        repo.listed(),
        vec!["bar-1-1-any.pkg.tar.zst", "foo-2-1-any.pkg.tar.zst"]
    );
    assert_eq!(repo.indexed(), repo.listed());
    assert!(repo.files_on_disk().iter().all(|name| !name.starts_with('.')));
}

#[test]
fn backup_with_unfinished_upload_is_restored_beside_other_versions() {
    let repo = TestRepo::new();
    repo.add("foo-git-1-any.pkg.tar.zst", "foo").unwrap();
    let dir = repo.branch_dir();
    // Interrupted while moving the foo archives aside.
    fs::write(dir.join(".upload-crashed.part"), package_bytes("foo")).unwrap();
    fs::write(dir.join(".foo-1-1-any.pkg.tar.zst.superseded"), package_bytes("foo")).unwrap();

    repo.store.rebuild(BRANCH).unwrap();

    assert_eq!(
        repo.listed(),
        vec!["foo-1-1-any.pkg.tar.zst", "foo-git-1-any.pkg.tar.zst"]
    );
    assert_eq!(repo.indexed(), repo.listed());
}

#[test]
fn directory_at_upload_target_does_not_wedge_branch() {
    let repo = TestRepo::new();
    fs::create_dir(repo.branch_dir().join("x.pkg.tar.zst")).unwrap();

    let err = repo.add("x.pkg.tar.zst", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);

    repo.add("y.pkg.tar.zst", "y").unwrap();
    repo.store.remove(BRANCH, ["y"]).unwrap();
    repo.store.rebuild(BRANCH).unwrap();
    assert_eq!(repo.files_on_disk(), vec!["x.pkg.tar.zst"]);
}
