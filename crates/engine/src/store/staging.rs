//! Staging files inside a branch directory
//!
//! Uploads land in a hidden `.upload-*.part` temp file; archives about to be
//! superseded are renamed to hidden `.<file>.superseded` backups until the
//! index rebuild has succeeded. Neither is visible to listings or the index.

use arpm_core::layout::{
    is_upload_file_name, superseded_file_name, superseded_origin, withdrawn_file_name,
    UPLOAD_PREFIX, UPLOAD_SUFFIX,
};
use arpm_core::{Error, Result};
use arpm_package::{list_archives, read_package_name};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Clean up staging files left by an interrupted mutation
///
/// An upload file still present means the interrupted add never committed,
/// so every backup is renamed back. Without one the add committed, and a
/// backup is dropped when its file name is taken again or when a visible
/// archive carries its package name; otherwise it is renamed back. Uploads
/// are deleted last. Returns the number of files handled.
pub(crate) fn sweep(dir: &Path) -> Result<usize> {
    let mut uploads = Vec::new();
    let mut backups = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let path = entry.path();

        if is_upload_file_name(name) {
            uploads.push(path);
        } else if let Some(origin) = superseded_origin(name) {
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
            if file_type.is_dir() {
                warn!(target: "arpm::store", path = %path.display(), "Skipping directory with a backup name");
                continue;
            }
            let original = dir.join(origin);
            backups.push((path, original));
        }
    }

    let committed = uploads.is_empty();
    let visible = if committed && !backups.is_empty() {
        visible_package_names(dir)?
    } else {
        HashSet::new()
    };

    let mut handled = 0;
    for (backup, original) in backups {
        let superseded = fs::symlink_metadata(&original).is_ok()
            || (committed
                && read_package_name(&backup).map_or(false, |name| visible.contains(&name)));
        if superseded {
            remove_if_present(&backup)?;
            warn!(target: "arpm::store", path = %backup.display(), "Removed stale backup");
        } else {
            fs::rename(&backup, &original).map_err(|e| Error::io(&backup, e))?;
            warn!(
                target: "arpm::store",
                path = %original.display(),
                "Restored archive from interrupted update"
            );
        }
        handled += 1;
    }

    for upload in uploads {
        remove_if_present(&upload)?;
        warn!(target: "arpm::store", path = %upload.display(), "Removed stale upload");
        handled += 1;
    }
    Ok(handled)
}

/// Package names of the readable archives in `dir`
fn visible_package_names(dir: &Path) -> Result<HashSet<String>> {
    Ok(list_archives(dir)?
        .iter()
        .filter_map(|path| read_package_name(path).ok())
        .collect())
}

/// Move a committed archive back under an upload name
///
/// Until the returned file is deleted the branch reads as mid-add, so a
/// crash while the backups are restored still rolls back.
pub(crate) fn withdraw(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Err(Error::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a file path"),
        ));
    };
    let withdrawn = path.with_file_name(withdrawn_file_name(name));
    fs::rename(path, &withdrawn).map_err(|e| Error::io(path, e))?;
    Ok(withdrawn)
}

/// Stream `content` into a fresh temp file in `dir`, synced to disk
///
/// The file is deleted when the returned handle is dropped without being
/// persisted.
pub(crate) fn receive<R: Read>(dir: &Path, mut content: R) -> Result<NamedTempFile> {
    let mut upload = tempfile::Builder::new()
        .prefix(UPLOAD_PREFIX)
        .suffix(UPLOAD_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    io::copy(&mut content, upload.as_file_mut()).map_err(|e| Error::io(upload.path(), e))?;
    upload
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(upload.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(upload.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::io(upload.path(), e))?;
    }

    Ok(upload)
}

pub(crate) fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Archives moved aside during an update
#[derive(Debug, Default)]
pub(crate) struct Displaced {
    // (original, backup)
    moves: Vec<(PathBuf, PathBuf)>,
}

impl Displaced {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Original paths, in the order they were moved
    pub(crate) fn originals(&self) -> Vec<PathBuf> {
        self.moves.iter().map(|(original, _)| original.clone()).collect()
    }

    /// Rename `path` to its backup name
    pub(crate) fn displace(&mut self, path: &Path) -> Result<()> {
        if self.moves.iter().any(|(original, _)| original == path) {
            return Ok(());
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a file path"),
            ));
        };
        let backup = path.with_file_name(superseded_file_name(name));
        fs::rename(path, &backup).map_err(|e| Error::io(path, e))?;
        self.moves.push((path.to_path_buf(), backup));
        Ok(())
    }

    /// Move every backup back to its original name
    ///
    /// Keeps going after a failure and returns the first error; backups that
    /// could not be moved are picked up by the next [`sweep`].
    pub(crate) fn restore(self) -> Result<()> {
        let mut first_err = None;
        for (original, backup) in self.moves.into_iter().rev() {
            if let Err(e) = fs::rename(&backup, &original) {
                warn!(
                    target: "arpm::store",
                    path = %original.display(),
                    error = %e,
                    "Unable to restore superseded archive"
                );
                first_err.get_or_insert(Error::io(&backup, e));
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Delete every backup
    pub(crate) fn discard(self) {
        for (_, backup) in self.moves {
            if let Err(e) = remove_if_present(&backup) {
                // Left for the next sweep.
                warn!(target: "arpm::store", error = %e, "Unable to delete backup");
            }
        }
    }
}
