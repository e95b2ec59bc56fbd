//! Removing packages from a branch

use super::staging;
use super::PackageStore;
use crate::rebuild::RebuildOutcome;
use arpm_core::{validate_file_token, BranchName, Error, Result, PKG_EXT};
use arpm_package::build_name_index;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a successful remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Archives deleted, in deletion order
    pub removed: Vec<PathBuf>,
    /// Index state after the remove
    pub index: RebuildOutcome,
}

impl PackageStore {
    /// Remove archives from `branch`
    ///
    /// Each token is a package name or an archive file name. Every archive
    /// indexed under the token is deleted; a token ending in `.pkg.tar.zst`
    /// also deletes the file of that name. Unknown tokens are ignored.
    ///
    /// Deletions are not undone if the rebuild fails; [`PackageStore::rebuild`]
    /// reconciles the index afterwards.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if any token is not a single path segment (checked
    ///   before anything is deleted)
    /// - `BranchNotFound` if the branch does not exist
    /// - `Io` for the first deletion that failed (the rest still ran)
    /// - `IndexRebuild` if the index could not be rebuilt; a deletion failure
    ///   in the same call is appended to its reason
    pub fn remove<I, S>(&self, branch: &str, tokens: I) -> Result<RemoveOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let branch = BranchName::new(branch)?;
        let tokens = tokens
            .into_iter()
            .map(|token| -> Result<String> {
                let token = token.as_ref();
                validate_file_token(token)?;
                Ok(token.to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        let dir = self.existing_branch_dir(&branch)?;

        self.locks
            .with_lock(&branch, || self.remove_locked(&dir, &branch, &tokens))
    }

    fn remove_locked(
        &self,
        dir: &Path,
        branch: &BranchName,
        tokens: &[String],
    ) -> Result<RemoveOutcome> {
        staging::sweep(dir)?;
        let index = build_name_index(dir)?;

        let mut removed = Vec::new();
        let mut first_err: Option<Error> = None;
        for token in tokens {
            let mut targets = index.paths(token).to_vec();
            if token.ends_with(PKG_EXT) {
                let literal = dir.join(token);
                if !targets.contains(&literal) {
                    targets.push(literal);
                }
            }
            for path in targets {
                match fs::remove_file(&path) {
                    Ok(()) => {
                        info!(target: "arpm::store", path = %path.display(), "Archive removed");
                        removed.push(path);
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => {
                        warn!(
                            target: "arpm::store",
                            path = %path.display(),
                            error = %e,
                            "Unable to remove archive"
                        );
                        first_err.get_or_insert(Error::io(&path, e));
                    }
                }
            }
        }

        let index = match (self.rebuilder.rebuild(dir, branch), first_err) {
            (Ok(index), None) => index,
            (Ok(_), Some(err)) => return Err(err),
            (Err(rebuild_err), None) => return Err(rebuild_err),
            (
                Err(Error::IndexRebuild {
                    branch,
                    reason,
                    output,
                }),
                Some(err),
            ) => {
                return Err(Error::index_rebuild(
                    branch,
                    format!("{}; removal also failed: {}", reason, err),
                    output,
                ));
            }
            (Err(rebuild_err), Some(err)) => {
                warn!(target: "arpm::store", branch = %branch, error = %rebuild_err, "Index rebuild failed");
                return Err(err);
            }
        };

        info!(
            target: "arpm::store",
            branch = %branch,
            removed = removed.len(),
            "Remove finished"
        );
        Ok(RemoveOutcome { removed, index })
    }
}
