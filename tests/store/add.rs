//! Add Tests
//!
//! Tests for adding packages:
//! - New packages appear in listings and in the index
//! - Same logical name supersedes, other names are kept
//! - Invalid uploads and names are rejected before touching the branch

use crate::common::*;
use arpm::read_package_name;

// ============================================================================
// Supersede semantics
// ============================================================================

#[test]
fn added_package_is_listed_and_indexed() {
    let repo = TestRepo::new();

    let outcome = repo.add("foo-1.0-1-x86_64.pkg.tar.zst", "foo").unwrap();

    assert_eq!(outcome.package_name, "foo");
    assert!(!outcome.is_update());
    assert_eq!(repo.listed(), vec!["foo-1.0-1-x86_64.pkg.tar.zst"]);
    assert_eq!(repo.indexed(), vec!["foo-1.0-1-x86_64.pkg.tar.zst"]);
}

#[test]
fn same_name_replaces_only_that_name() {
    let repo = TestRepo::new();
    repo.add("a.pkg.tar.zst", "foo").unwrap();
    repo.add("b.pkg.tar.zst", "bar").unwrap();

    let outcome = repo.add("c.pkg.tar.zst", "foo").unwrap();

    assert!(outcome.is_update());
    assert_eq!(outcome.replaced, vec![repo.branch_dir().join("a.pkg.tar.zst")]);
    assert_eq!(repo.listed(), vec!["b.pkg.tar.zst", "c.pkg.tar.zst"]);
    assert_eq!(
        repo.tool.last_call().unwrap().archive_names(),
        vec!["b.pkg.tar.zst", "c.pkg.tar.zst"]
    );
}

#[test]
fn repeated_adds_keep_one_archive() {
    let repo = TestRepo::new();

    for version in 1..=5 {
        let file = format!("foo-{version}-1-any.pkg.tar.zst");
        repo.add(&file, "foo").unwrap();
    }

    assert_eq!(repo.listed(), vec!["foo-5-1-any.pkg.tar.zst"]);
    assert_eq!(repo.indexed(), vec!["foo-5-1-any.pkg.tar.zst"]);
    assert_eq!(repo.tool.call_count(), 5);
}

#[test]
fn name_comes_from_metadata_not_file_name() {
    let repo = TestRepo::new();
    repo.add("foo-1-1-any.pkg.tar.zst", "foo").unwrap();

    // File name suggests foo, content says bar: foo stays.
    repo.add("foo-2-1-any.pkg.tar.zst", "bar").unwrap();

    assert_eq!(
        repo.listed(),
        vec!["foo-1-1-any.pkg.tar.zst", "foo-2-1-any.pkg.tar.zst"]
    );
    let path = repo.branch_dir().join("foo-2-1-any.pkg.tar.zst");
    assert_eq!(read_package_name(&path).unwrap(), "bar");
}

#[test]
fn upload_over_same_file_name() {
    let repo = TestRepo::new();
    repo.add("foo.pkg.tar.zst", "foo").unwrap();

    let outcome = repo.add("foo.pkg.tar.zst", "foo").unwrap();

    assert!(outcome.is_update());
    assert_eq!(repo.files_on_disk(), vec!["core.db", "core.db.tar.gz", "foo.pkg.tar.zst"]);
}

#[test]
fn index_files_of_other_branches_are_not_touched() {
    let repo = TestRepo::new();
    std::fs::write(repo.branch_dir().join("extra.db.tar.gz"), b"foreign").unwrap();

    repo.add("foo.pkg.tar.zst", "foo").unwrap();

    assert!(repo.branch_dir().join("extra.db.tar.gz").exists());
}

// ============================================================================
// Rejected uploads
// ============================================================================

#[test]
fn upload_without_metadata_is_invalid_package() {
    let repo = TestRepo::new();
    let data = ArchiveBuilder::new()
        .file("usr/bin/foo", b"binary")
        .to_bytes()
        .unwrap();

    let err = repo
        .store
        .add(BRANCH, "foo.pkg.tar.zst", data.as_slice())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPackage);
    assert!(repo.files_on_disk().is_empty());
    assert_eq!(repo.tool.call_count(), 0);
}

#[test]
fn upload_with_empty_metadata_is_invalid_package() {
    let repo = TestRepo::new();
    let data = ArchiveBuilder::new().pkginfo("").to_bytes().unwrap();

    let err = repo
        .store
        .add(BRANCH, "foo.pkg.tar.zst", data.as_slice())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPackage);
    assert!(err.to_string().contains("empty metadata entry"));
    assert!(repo.files_on_disk().is_empty());
}

#[test]
fn path_escaping_names_are_rejected() {
    let repo = TestRepo::new();

    let err = repo
        .store
        .add("../outside", "foo.pkg.tar.zst", package_bytes("foo").as_slice())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);

    let err = repo
        .store
        .add(BRANCH, "../foo.pkg.tar.zst", package_bytes("foo").as_slice())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);

    assert!(repo.files_on_disk().is_empty());
    assert_eq!(file_names(repo.dir.path()), vec![BRANCH]);
}

#[test]
fn add_to_unknown_branch() {
    let repo = TestRepo::new();

    let err = repo
        .store
        .add("testing", "foo.pkg.tar.zst", package_bytes("foo").as_slice())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BranchNotFound);
}
