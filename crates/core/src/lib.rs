//! Core types for arpm
//!
//! This crate defines the foundational types shared by every layer:
//! - Error: the single error type and its `ErrorKind` classification
//! - BranchName: validated branch identifier (one directory under the root)
//! - ArchiveFileName: validated package archive file name
//! - layout: on-disk naming contract (archive suffix, index prefix, staging files)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod layout;
pub mod names;

pub use error::{Error, ErrorKind, Result};
pub use layout::{
    index_file_name, is_archive_file_name, is_index_file_name, is_upload_file_name,
    INDEX_EXT, MAX_PKGINFO_BYTES, NO_ENTRIES, PKGINFO_ENTRY, PKGNAME_KEY, PKG_EXT,
};
pub use names::{
    validate_file_token, ArchiveFileName, BranchName, BranchNameError, FileNameError,
    MAX_BRANCH_NAME_LENGTH, MAX_FILE_NAME_LENGTH,
};
