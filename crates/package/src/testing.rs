//! Fixture archives for tests
//!
//! Builds small `.pkg.tar.zst` files in the same shape `makepkg` produces,
//! plus deliberately broken variants.

use arpm_core::{Error, Result, PKGINFO_ENTRY};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tar::{Builder, EntryType, Header};

/// Builder for a package archive
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, EntryType, Vec<u8>)>,
}

impl ArchiveBuilder {
    /// Empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive whose `.PKGINFO` declares `name`
    pub fn package(name: &str) -> Self {
        Self::new()
            .file(".BUILDINFO", b"format = 2\n")
            .pkginfo(&pkginfo(name, "1.0-1"))
            .file("usr/share/doc/readme", name.as_bytes())
    }

    /// Add a `.PKGINFO` entry with the given content
    pub fn pkginfo(self, content: &str) -> Self {
        self.file(PKGINFO_ENTRY, content.as_bytes())
    }

    /// Add a regular file entry
    pub fn file(mut self, path: &str, data: &[u8]) -> Self {
        self.entries
            .push((path.to_string(), EntryType::Regular, data.to_vec()));
        self
    }

    /// Add a directory entry
    pub fn dir(mut self, path: &str) -> Self {
        self.entries
            .push((path.to_string(), EntryType::Directory, Vec::new()));
        self
    }

    /// Encode the archive into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let encoder = zstd::Encoder::new(&mut buffer, 3)
                .map_err(|e| Error::format("<memory>", format!("zstd encoder: {}", e)))?
                .auto_finish();
            self.write_tar(encoder)?;
        }
        Ok(buffer)
    }

    /// Write the archive to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let encoder = zstd::Encoder::new(BufWriter::new(file), 3)
            .map_err(|e| Error::format(path, format!("zstd encoder: {}", e)))?
            .auto_finish();
        self.write_tar(encoder)
    }

    fn write_tar<W: Write>(&self, writer: W) -> Result<()> {
        let mut builder = Builder::new(writer);
        for (path, kind, data) in &self.entries {
            let mut header = Header::new_gnu();
            header
                .set_path(path)
                .map_err(|e| Error::format(path, format!("set path: {}", e)))?;
            header.set_entry_type(*kind);
            header.set_size(data.len() as u64);
            header.set_mode(if kind.is_dir() { 0o755 } else { 0o644 });
            header.set_mtime(0);
            header.set_cksum();
            builder
                .append(&header, data.as_slice())
                .map_err(|e| Error::format(path, format!("append: {}", e)))?;
        }
        builder
            .into_inner()
            .map_err(|e| Error::format("<archive>", format!("tar finish: {}", e)))?;
        Ok(())
    }
}

/// Minimal `.PKGINFO` content for `name`
pub fn pkginfo(name: &str, version: &str) -> String {
    format!(
        "# Generated by makepkg 6.0.2\npkgname = {name}\npkgbase = {name}\npkgver = {version}\narch = x86_64\n"
    )
}
