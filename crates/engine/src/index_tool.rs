//! External index tool capability
//!
//! The binary index format is owned by an external program invoked as
//! `<tool> <index-path> <archive-path>...`. The store only depends on the
//! [`IndexTool`] trait so tests can substitute a fake.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Failure of an index tool run
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct IndexToolError {
    /// Summary of the failure
    pub reason: String,
    /// Combined stdout/stderr of the tool, empty if it never ran
    pub output: String,
}

impl IndexToolError {
    /// Create an error with captured tool output
    pub fn new(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            output: output.into(),
        }
    }
}

/// Writes a branch index covering a set of archives
pub trait IndexTool: Send + Sync {
    /// Create `index` from `archives`
    ///
    /// Called only with a non-empty archive list, after every previous index
    /// file of the branch was deleted.
    fn build(&self, index: &Path, archives: &[PathBuf]) -> Result<(), IndexToolError>;
}

/// `repo-add` compatible tool resolved on `PATH`
#[derive(Debug, Clone)]
pub struct RepoAdd {
    program: String,
}

impl RepoAdd {
    /// Tool invoking `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Configured program name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    fn resolve(&self) -> Result<PathBuf, IndexToolError> {
        which::which(&self.program).map_err(|e| {
            IndexToolError::new(format!("index tool '{}' not found: {}", self.program, e), "")
        })
    }
}

impl Default for RepoAdd {
    fn default() -> Self {
        Self::new("repo-add")
    }
}

impl IndexTool for RepoAdd {
    fn build(&self, index: &Path, archives: &[PathBuf]) -> Result<(), IndexToolError> {
        let program = self.resolve()?;
        let mut cmd = Command::new(&program);
        cmd.arg(index).args(archives);
        if let Some(dir) = index.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            IndexToolError::new(format!("failed to run '{}': {}", program.display(), e), "")
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(
            target: "arpm::rebuild",
            program = %program.display(),
            index = %index.display(),
            archives = archives.len(),
            status = %output.status,
            output = %combined.trim_end(),
            "Index tool finished"
        );

        if !output.status.success() {
            let reason = match output.status.code() {
                Some(code) => format!("'{}' exited with status {}", self.program, code),
                None => format!("'{}' was terminated by a signal", self.program),
            };
            return Err(IndexToolError::new(reason, combined));
        }
        Ok(())
    }
}
