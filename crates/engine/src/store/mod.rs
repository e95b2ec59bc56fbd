//! Package store
//!
//! `PackageStore` owns the repository root. Each branch is a flat directory
//! `<root>/<branch>` holding package archives and the index derived from
//! them. Mutations of a branch are serialized by a per-branch lock and keep
//! the archive set and the index jointly consistent:
//!
//! - `add` stages the upload, moves superseded archives aside, swaps the new
//!   file in and rebuilds the index, rolling everything back on failure
//! - `remove` deletes archives by package name or file name and rebuilds;
//!   deletions are never undone
//!
//! Listings read the directory without locking.

mod add;
mod listing;
mod remove;
mod staging;

pub use add::AddOutcome;
pub use listing::{BranchListing, BranchSummary, Listing, PackageListing};
pub use remove::RemoveOutcome;

use crate::config::StoreConfig;
use crate::index_tool::{IndexTool, RepoAdd};
use crate::locks::BranchLocks;
use crate::rebuild::{RebuildOutcome, Rebuilder};
use arpm_core::{validate_file_token, BranchName, Error, Result};
use arpm_package::list_archives;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// File-based package repository organized into branches
#[derive(Debug)]
pub struct PackageStore {
    root: PathBuf,
    rebuilder: Rebuilder,
    locks: BranchLocks,
}

impl PackageStore {
    /// Open the store described by `config`, creating the root if needed
    ///
    /// # Errors
    ///
    /// - `Config` if the configuration is invalid
    /// - `Io` if the root directory cannot be created
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let tool = RepoAdd::new(config.index_tool.clone());
        let store = Self::with_index_tool(&config.root, Arc::new(tool))?;
        info!(
            target: "arpm::store",
            root = %store.root.display(),
            index_tool = %config.index_tool,
            "Package store opened"
        );
        Ok(store)
    }

    /// Open a store at `root` that rebuilds indexes with `tool`
    pub fn with_index_tool(root: impl Into<PathBuf>, tool: Arc<dyn IndexTool>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| Error::io(&root, e))?;
        Ok(Self {
            root,
            rebuilder: Rebuilder::new(tool),
            locks: BranchLocks::new(),
        })
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `branch` (whether or not it exists)
    pub fn branch_dir(&self, branch: &BranchName) -> PathBuf {
        self.root.join(branch.as_str())
    }

    /// Create a branch; creating an existing branch is not an error
    pub fn create_branch(&self, name: &str) -> Result<PathBuf> {
        let branch = BranchName::new(name)?;
        let dir = self.branch_dir(&branch);
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        info!(target: "arpm::store", branch = %branch, "Branch directory ready");
        Ok(dir)
    }

    /// All branches with their archive counts, sorted by name
    ///
    /// Hidden entries, non-directories and names that are not valid branch
    /// names are skipped.
    pub fn list_branches(&self) -> Result<BranchListing> {
        let mut branches = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))? {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if BranchName::validate(name).is_err() || !entry.path().is_dir() {
                continue;
            }
            branches.push(BranchSummary {
                name: name.to_string(),
                archive_count: list_archives(&entry.path())?.len(),
            });
        }
        branches.sort();
        Ok(Listing::from_vec(branches))
    }

    /// Archive file names in `branch`, sorted
    pub fn list(&self, branch: &str) -> Result<PackageListing> {
        let branch = BranchName::new(branch)?;
        let dir = self.existing_branch_dir(&branch)?;
        let names = list_archives(&dir)?
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(Listing::from_vec(names))
    }

    /// Path of the regular file `file` in `branch`, for downloads
    ///
    /// # Errors
    ///
    /// - `InvalidName` if `file` is not a single visible path segment
    /// - `BranchNotFound` / `FileNotFound` if either is absent
    pub fn package_path(&self, branch: &str, file: &str) -> Result<PathBuf> {
        let branch = BranchName::new(branch)?;
        validate_file_token(file)?;
        let dir = self.existing_branch_dir(&branch)?;
        let path = dir.join(file);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::FileNotFound {
                branch: branch.into_inner(),
                file: file.to_string(),
            })
        }
    }

    /// Rebuild the index of `branch` from the archives on disk
    pub fn rebuild(&self, branch: &str) -> Result<RebuildOutcome> {
        let branch = BranchName::new(branch)?;
        let dir = self.existing_branch_dir(&branch)?;
        self.locks.with_lock(&branch, || {
            staging::sweep(&dir)?;
            self.rebuilder.rebuild(&dir, &branch)
        })
    }

    fn existing_branch_dir(&self, branch: &BranchName) -> Result<PathBuf> {
        let dir = self.branch_dir(branch);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::BranchNotFound(branch.to_string()))
        }
    }
}
