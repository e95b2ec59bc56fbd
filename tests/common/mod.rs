//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use arpm::{ErrorKind, PackageListing, PackageStore};
pub use arpm_engine::testing::{read_index, RecordingIndexTool};
pub use arpm_package::testing::{pkginfo, ArchiveBuilder};
use tempfile::TempDir;

/// Branch every `TestRepo` starts with.
pub const BRANCH: &str = "core";

// ============================================================================
// TestRepo - store on a temp root with a recording index tool
// ============================================================================

/// Store on a temporary root with one branch and a fake index tool.
pub struct TestRepo {
    pub store: Arc<PackageStore>,
    pub tool: Arc<RecordingIndexTool>,
    pub dir: TempDir,
}

impl TestRepo {
    /// Repository with an empty `core` branch.
    pub fn new() -> Self {
        Self::with_tool(RecordingIndexTool::new())
    }

    /// Repository whose index tool fails every call.
    pub fn failing() -> Self {
        Self::with_tool(RecordingIndexTool::failing())
    }

    fn with_tool(tool: RecordingIndexTool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tool = Arc::new(tool);
        let store = PackageStore::with_index_tool(dir.path(), tool.clone())
            .expect("Failed to open store");
        store.create_branch(BRANCH).expect("Failed to create branch");
        TestRepo {
            store: Arc::new(store),
            tool,
            dir,
        }
    }

    /// Directory of `core`.
    pub fn branch_dir(&self) -> PathBuf {
        self.dir.path().join(BRANCH)
    }

    /// Index target of `core`.
    pub fn index_path(&self) -> PathBuf {
        self.branch_dir().join("core.db.tar.gz")
    }

    /// Add an archive declaring `name` to `core` as `file`.
    pub fn add(&self, file: &str, name: &str) -> arpm::Result<arpm::AddOutcome> {
        self.store.add(BRANCH, file, package_bytes(name).as_slice())
    }

    /// Archive file names listed for `core`.
    pub fn listed(&self) -> Vec<String> {
        self.store
            .list(BRANCH)
            .expect("Failed to list branch")
            .into_vec()
    }

    /// Every file in `core`, hidden ones included, sorted.
    pub fn files_on_disk(&self) -> Vec<String> {
        file_names(&self.branch_dir())
    }

    /// Index files of `core` currently on disk.
    pub fn index_files(&self) -> Vec<String> {
        self.files_on_disk()
            .into_iter()
            .filter(|name| name.starts_with("core.") && !name.ends_with(".pkg.tar.zst"))
            .collect()
    }

    /// Archive names recorded in the current index.
    pub fn indexed(&self) -> Vec<String> {
        read_index(&self.index_path()).expect("Failed to read index")
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Compressed archive whose `.PKGINFO` declares `name`.
pub fn package_bytes(name: &str) -> Vec<u8> {
    ArchiveBuilder::package(name)
        .to_bytes()
        .expect("Failed to build archive")
}

/// Sorted names of the entries of `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
