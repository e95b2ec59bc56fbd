//! Index rebuilder
//!
//! Regenerates a branch index from scratch: every existing index file is
//! deleted first, then the index tool is run over all archives currently in
//! the branch. A branch without archives ends up without any index file.

use crate::index_tool::IndexTool;
use arpm_core::layout::index_file_name;
use arpm_core::{is_index_file_name, BranchName, Error, Result};
use arpm_package::list_archives;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a successful rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// The branch has no archives; every index file was removed
    Removed,
    /// The index was written for these archives
    Rebuilt {
        /// Index file passed to the tool
        index: PathBuf,
        /// Archive paths passed to the tool
        archives: Vec<PathBuf>,
    },
}

impl RebuildOutcome {
    /// Number of archives covered by the index
    pub fn archive_count(&self) -> usize {
        match self {
            RebuildOutcome::Removed => 0,
            RebuildOutcome::Rebuilt { archives, .. } => archives.len(),
        }
    }
}

/// Rebuilds branch indexes through an [`IndexTool`]
#[derive(Clone)]
pub struct Rebuilder {
    tool: Arc<dyn IndexTool>,
}

impl std::fmt::Debug for Rebuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rebuilder").finish_non_exhaustive()
    }
}

impl Rebuilder {
    /// Rebuilder running `tool`
    pub fn new(tool: Arc<dyn IndexTool>) -> Self {
        Self { tool }
    }

    /// Rebuild the index of `branch`, whose directory is `dir`
    ///
    /// # Errors
    ///
    /// - `Io` if an index file cannot be deleted or the directory cannot be read
    /// - `IndexRebuild` if the tool is missing or fails
    pub fn rebuild(&self, dir: &Path, branch: &BranchName) -> Result<RebuildOutcome> {
        let removed = remove_index_files(dir, branch)?;
        if removed > 0 {
            debug!(target: "arpm::rebuild", branch = %branch, removed, "Index files removed");
        }

        let archives = list_archives(dir)?;
        if archives.is_empty() {
            info!(target: "arpm::rebuild", branch = %branch, "Branch empty, no index");
            return Ok(RebuildOutcome::Removed);
        }

        let index = dir.join(index_file_name(branch.as_str()));
        self.tool
            .build(&index, &archives)
            .map_err(|e| Error::index_rebuild(branch.as_str(), e.reason, e.output))?;

        info!(
            target: "arpm::rebuild",
            branch = %branch,
            archives = archives.len(),
            "Index rebuilt"
        );
        Ok(RebuildOutcome::Rebuilt { index, archives })
    }
}

/// Delete every index file of `branch` in `dir`, returning how many were removed
pub fn remove_index_files(dir: &Path, branch: &BranchName) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_index_file_name(branch.as_str(), name) {
            continue;
        }
        let path = entry.path();
        // symlink_metadata so a dangling `<branch>.db` link is still removed
        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => continue,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(Error::io(&path, e)),
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&path, e)),
        }
    }
    Ok(removed)
}
