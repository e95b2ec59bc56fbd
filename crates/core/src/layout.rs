//! On-disk layout of a repository
//!
//! ```text
//! root/
//! ├── core/                         # one directory per branch
//! │   ├── foo-1.0-1-x86_64.pkg.tar.zst
//! │   ├── bar-2.3-1-any.pkg.tar.zst
//! │   ├── core.db.tar.gz            # index written by the external tool
//! │   ├── core.db -> core.db.tar.gz
//! │   └── .upload-XXXX.part         # staging, never listed
//! └── testing/
//! ```
//!
//! Staging files are hidden, so they match neither the archive filter nor
//! the index prefix (branch names never start with a dot).

/// Suffix of package archive files
pub const PKG_EXT: &str = ".pkg.tar.zst";

/// Suffix of the index file passed to the index tool
pub const INDEX_EXT: &str = ".db.tar.gz";

/// Name of the control metadata entry inside a package archive
pub const PKGINFO_ENTRY: &str = ".PKGINFO";

/// Key holding the logical package name inside the metadata entry
pub const PKGNAME_KEY: &str = "pkgname";

/// Upper bound on the metadata entry size (64 KiB)
pub const MAX_PKGINFO_BYTES: usize = 64 * 1024;

/// Text rendered for an empty listing
pub const NO_ENTRIES: &str = "No entries.";

/// Prefix of upload temp files
pub const UPLOAD_PREFIX: &str = ".upload-";

/// Suffix of upload temp files
pub const UPLOAD_SUFFIX: &str = ".part";

/// Suffix of superseded-archive backups
pub const SUPERSEDED_SUFFIX: &str = ".superseded";

/// True if `name` is a visible package archive file name
pub fn is_archive_file_name(name: &str) -> bool {
    !name.starts_with('.') && name.len() > PKG_EXT.len() && name.ends_with(PKG_EXT)
}

/// True if `name` belongs to the index of `branch`
///
/// Archive files that happen to start with the branch prefix are not index
/// files.
pub fn is_index_file_name(branch: &str, name: &str) -> bool {
    name.len() > branch.len() + 1
        && name.starts_with(branch)
        && name[branch.len()..].starts_with('.')
        && !is_archive_file_name(name)
}

/// True if `name` is an upload temp file
///
/// While one exists the add that created it has not committed.
pub fn is_upload_file_name(name: &str) -> bool {
    name.starts_with(UPLOAD_PREFIX) && name.ends_with(UPLOAD_SUFFIX)
}

/// Upload name an archive is moved back to while an add is rolled back
pub fn withdrawn_file_name(archive: &str) -> String {
    format!("{}{}{}", UPLOAD_PREFIX, archive, UPLOAD_SUFFIX)
}

/// File name of the index target for `branch`
pub fn index_file_name(branch: &str) -> String {
    format!("{}{}", branch, INDEX_EXT)
}

/// File name of the backup kept for a superseded archive
pub fn superseded_file_name(archive: &str) -> String {
    format!(".{}{}", archive, SUPERSEDED_SUFFIX)
}

/// Archive name a backup was made from, if `name` is a backup
pub fn superseded_origin(name: &str) -> Option<&str> {
    name.strip_prefix('.')?.strip_suffix(SUPERSEDED_SUFFIX)
}
