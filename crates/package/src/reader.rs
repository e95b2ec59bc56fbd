//! Package name extraction
//!
//! Streams a `.pkg.tar.zst` archive until the `.PKGINFO` entry is found and
//! returns its `pkgname`. Nothing else in the archive is read or validated.

use crate::pkginfo::parse_pkgname;
use arpm_core::{Error, Result, MAX_PKGINFO_BYTES, PKGINFO_ENTRY};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tar::Archive;

/// Extract the logical package name of the archive at `path`
///
/// # Errors
///
/// - `Io` if the file cannot be opened
/// - `Format` if the zstd or tar stream cannot be read
/// - `CorruptArchive` if `.PKGINFO` is empty or larger than 64 KiB
/// - `NotFound` if there is no `.PKGINFO` or it has no `pkgname`
pub fn read_package_name(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_package_name_from_reader(BufReader::new(file), path)
}

/// Extract the logical package name from an archive stream
///
/// `origin` is only used to label errors.
pub fn read_package_name_from_reader<R: Read>(reader: R, origin: &Path) -> Result<String> {
    let decoder = zstd::Decoder::new(reader)
        .map_err(|e| Error::format(origin, format!("zstd decode: {}", e)))?;

    let mut archive = Archive::new(decoder);

    for entry in archive
        .entries()
        .map_err(|e| Error::format(origin, e.to_string()))?
    {
        let mut entry = entry.map_err(|e| Error::format(origin, format!("tar entry: {}", e)))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let is_pkginfo = entry
            .path()
            .map_err(|e| Error::format(origin, format!("tar path: {}", e)))?
            .file_name()
            == Some(OsStr::new(PKGINFO_ENTRY));
        if !is_pkginfo {
            continue;
        }

        let content = read_bounded(&mut entry, origin)?;
        let content = String::from_utf8_lossy(&content);
        return parse_pkgname(&content)
            .map(str::to_string)
            .ok_or_else(|| Error::not_found(origin, "no package name in metadata"));
    }

    Err(Error::not_found(origin, "no metadata entry in archive"))
}

/// Read a metadata entry, refusing to truncate it
fn read_bounded<R: Read>(entry: &mut R, origin: &Path) -> Result<Vec<u8>> {
    let mut content = Vec::with_capacity(4096);
    entry
        .take(MAX_PKGINFO_BYTES as u64 + 1)
        .read_to_end(&mut content)
        .map_err(|e| Error::format(origin, format!("read {}: {}", PKGINFO_ENTRY, e)))?;

    if content.is_empty() {
        return Err(Error::corrupt(origin, "empty metadata entry"));
    }
    if content.len() > MAX_PKGINFO_BYTES {
        return Err(Error::corrupt(origin, "metadata entry too large"));
    }
    Ok(content)
}
