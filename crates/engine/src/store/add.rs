//! Adding a package to a branch
//!
//! The upload is staged, its package name resolved, every archive of that
//! name moved aside, the upload renamed into place and the index rebuilt.
//! Only when the rebuild succeeds are the superseded archives deleted. Any
//! failure puts the branch back as it was, index included.

use super::staging::{self, Displaced};
use super::PackageStore;
use crate::rebuild::RebuildOutcome;
use arpm_core::{ArchiveFileName, BranchName, Error, Result};
use arpm_package::{build_name_index, read_package_name};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a successful add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Final path of the new archive
    pub path: PathBuf,
    /// Package name read from the archive
    pub package_name: String,
    /// Archives that were superseded and deleted
    pub replaced: Vec<PathBuf>,
    /// Index state after the add
    pub index: RebuildOutcome,
}

impl AddOutcome {
    /// True if the add replaced at least one archive
    pub fn is_update(&self) -> bool {
        !self.replaced.is_empty()
    }
}

impl PackageStore {
    /// Add the archive streamed from `content` to `branch` as `file_name`
    ///
    /// Every archive already in the branch with the same package name is
    /// superseded, as is any file already named `file_name`.
    ///
    /// # Errors
    ///
    /// - `InvalidName` for a bad branch name, or a `file_name` that is not a
    ///   visible `.pkg.tar.zst` file name or names a directory
    /// - `BranchNotFound` if the branch does not exist
    /// - `InvalidPackage` if the upload has no readable package name
    /// - `IndexRebuild` if the index could not be rebuilt (the branch is
    ///   rolled back)
    /// - `Io`, or any name index error, if the branch cannot be read
    pub fn add<R: Read>(&self, branch: &str, file_name: &str, content: R) -> Result<AddOutcome> {
        let branch = BranchName::new(branch)?;
        let file_name = ArchiveFileName::new(file_name)?;
        let dir = self.existing_branch_dir(&branch)?;

        self.locks
            .with_lock(&branch, || self.add_locked(&dir, &branch, &file_name, content))
    }

    fn add_locked<R: Read>(
        &self,
        dir: &Path,
        branch: &BranchName,
        file_name: &ArchiveFileName,
        content: R,
    ) -> Result<AddOutcome> {
        staging::sweep(dir)?;
        let dest = dir.join(file_name.as_str());
        if is_directory(&dest) {
            return Err(Error::invalid_name(format!(
                "'{}' is a directory in branch '{}'",
                file_name, branch
            )));
        }
        let index = build_name_index(dir)?;

        let upload = staging::receive(dir, content)?;
        let package_name = read_package_name(upload.path())
            .map_err(|e| Error::invalid_package(file_name.as_str(), e))?;

        let mut superseded: Vec<PathBuf> = index.paths(&package_name).to_vec();
        let occupied = fs::symlink_metadata(&dest).map_or(false, |meta| !meta.is_dir());
        if occupied && !superseded.contains(&dest) {
            superseded.push(dest.clone());
        }

        let mut displaced = Displaced::new();
        for path in &superseded {
            if let Err(e) = displaced.displace(path) {
                restore_quietly(displaced);
                return Err(e);
            }
        }

        if let Err(e) = upload.persist(&dest) {
            let tempfile::PersistError { error, file } = e;
            let err = Error::io(&dest, error);
            restore_quietly(displaced);
            // The temp file marks the add unfinished until the backups are back.
            drop(file);
            return Err(err);
        }

        match self.rebuilder.rebuild(dir, branch) {
            Ok(index) => {
                let replaced = displaced.originals();
                displaced.discard();
                info!(
                    target: "arpm::store",
                    branch = %branch,
                    package = %package_name,
                    file = %file_name,
                    replaced = replaced.len(),
                    "Package added"
                );
                Ok(AddOutcome {
                    path: dest,
                    package_name,
                    replaced,
                    index,
                })
            }
            Err(err) => Err(self.roll_back(dir, branch, &dest, displaced, err)),
        }
    }

    /// Undo a swapped-in upload after a failed rebuild
    fn roll_back(
        &self,
        dir: &Path,
        branch: &BranchName,
        dest: &Path,
        displaced: Displaced,
        err: Error,
    ) -> Error {
        warn!(
            target: "arpm::store",
            branch = %branch,
            file = %dest.display(),
            error = %err,
            "Index rebuild failed, rolling back"
        );
        match staging::withdraw(dest) {
            Ok(withdrawn) => {
                restore_quietly(displaced);
                if let Err(e) = staging::remove_if_present(&withdrawn) {
                    warn!(target: "arpm::store", error = %e, "Unable to remove new archive");
                }
            }
            Err(e) => {
                warn!(target: "arpm::store", error = %e, "Unable to withdraw new archive");
                if let Err(e) = staging::remove_if_present(dest) {
                    warn!(target: "arpm::store", error = %e, "Unable to remove new archive");
                }
                restore_quietly(displaced);
            }
        }

        match self.rebuilder.rebuild(dir, branch) {
            Ok(_) => err,
            Err(restore_err) => {
                warn!(
                    target: "arpm::store",
                    branch = %branch,
                    error = %restore_err,
                    "Unable to restore previous index"
                );
                match err {
                    Error::IndexRebuild {
                        branch,
                        reason,
                        output,
                    } => Error::index_rebuild(
                        branch,
                        format!("{}; restoring the previous index also failed", reason),
                        output,
                    ),
                    other => other,
                }
            }
        }
    }
}

fn is_directory(path: &Path) -> bool {
    fs::symlink_metadata(path).map_or(false, |meta| meta.is_dir())
}

fn restore_quietly(displaced: Displaced) {
    // Failures are logged inside; leftovers are recovered by the next sweep.
    let _ = displaced.restore();
}
