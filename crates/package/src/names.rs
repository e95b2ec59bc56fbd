//! Name index of a branch
//!
//! Groups the archive files of a branch directory by the package name found
//! inside each archive. The index is rebuilt from disk for every operation;
//! a single unreadable archive fails the whole build.

use crate::reader::read_package_name;
use arpm_core::{is_archive_file_name, Error, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Package name → archive paths, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: IndexMap<String, Vec<PathBuf>>,
}

impl NameIndex {
    /// Empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `name`
    pub fn insert(&mut self, name: impl Into<String>, path: PathBuf) {
        self.entries.entry(name.into()).or_default().push(path);
    }

    /// Archive paths carrying `name` (empty if unknown)
    pub fn paths(&self, name: &str) -> &[PathBuf] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// True if at least one archive carries `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate `(name, paths)` in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    /// Number of distinct package names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the branch holds no archives
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Archive files directly inside `dir`, sorted by file name
///
/// Hidden files, directories and names without the archive suffix are
/// skipped.
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_archive_file_name(name) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Build the name index of the branch directory `dir`
pub fn build_name_index(dir: &Path) -> Result<NameIndex> {
    let mut index = NameIndex::new();
    for path in list_archives(dir)? {
        let name = read_package_name(&path)?;
        index.insert(name, path);
    }
    debug!(
        target: "arpm::package",
        dir = %dir.display(),
        names = index.len(),
        "Name index built"
    );
    Ok(index)
}
