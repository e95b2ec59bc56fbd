//! Test doubles for the index tool

use crate::index_tool::{IndexTool, IndexToolError};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// One recorded [`IndexTool::build`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Index path passed to the tool
    pub index: PathBuf,
    /// Archive paths passed to the tool
    pub archives: Vec<PathBuf>,
}

impl ToolCall {
    /// File names of the archives, in call order
    pub fn archive_names(&self) -> Vec<String> {
        self.archives
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<ToolCall>,
    fail_next: usize,
    always_fail: bool,
}

/// Fake index tool that records calls and writes a plain-text index
///
/// On success it writes `<branch>.db.tar.gz` listing the archive file names
/// one per line, plus a `<branch>.db` sibling the way `repo-add` does.
#[derive(Debug, Default)]
pub struct RecordingIndexTool {
    state: Mutex<State>,
}

impl RecordingIndexTool {
    /// Tool that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Tool that fails every call
    pub fn failing() -> Self {
        let tool = Self::new();
        tool.state.lock().always_fail = true;
        tool
    }

    /// Make the next `n` calls fail
    pub fn fail_times(&self, n: usize) {
        self.state.lock().fail_next = n;
    }

    /// Toggle failing every call
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().always_fail = failing;
    }

    /// All calls so far
    pub fn calls(&self) -> Vec<ToolCall> {
        self.state.lock().calls.clone()
    }

    /// Most recent call
    pub fn last_call(&self) -> Option<ToolCall> {
        self.state.lock().calls.last().cloned()
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }
}

impl IndexTool for RecordingIndexTool {
    fn build(&self, index: &Path, archives: &[PathBuf]) -> Result<(), IndexToolError> {
        let fail = {
            let mut state = self.state.lock();
            state.calls.push(ToolCall {
                index: index.to_path_buf(),
                archives: archives.to_vec(),
            });
            if state.fail_next > 0 {
                state.fail_next -= 1;
                true
            } else {
                state.always_fail
            }
        };
        if fail {
            return Err(IndexToolError::new(
                "recording tool configured to fail",
                "==> ERROR: simulated failure",
            ));
        }

        let mut listing = String::new();
        for archive in archives {
            if let Some(name) = archive.file_name() {
                listing.push_str(&name.to_string_lossy());
                listing.push('\n');
            }
        }
        let write = |path: &Path| {
            fs::write(path, &listing)
                .map_err(|e| IndexToolError::new(format!("write {}: {}", path.display(), e), ""))
        };
        write(index)?;
        if let Some(link) = index
            .to_str()
            .and_then(|s| s.strip_suffix(".tar.gz"))
            .map(PathBuf::from)
        {
            write(&link)?;
        }
        Ok(())
    }
}

/// Archive file names recorded in an index written by [`RecordingIndexTool`]
pub fn read_index(index: &Path) -> std::io::Result<Vec<String>> {
    Ok(fs::read_to_string(index)?
        .lines()
        .map(str::to_string)
        .collect())
}
