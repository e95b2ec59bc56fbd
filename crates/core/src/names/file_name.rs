//! File names inside a branch directory
//!
//! Upload targets must be visible package archives. Removal tokens and
//! download requests only need to be a single, visible path segment.

use crate::layout::{is_archive_file_name, PKG_EXT};
use std::fmt;
use thiserror::Error;

/// Maximum length of a file name (common filesystem limit)
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Validated name of a package archive file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchiveFileName(String);

/// Error when validating a file name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNameError {
    /// Name is empty
    #[error("file name cannot be empty")]
    Empty,
    /// Name exceeds maximum length
    #[error("file name too long: {length} bytes (max {max})", max = MAX_FILE_NAME_LENGTH)]
    TooLong {
        /// Actual length of the name
        length: usize,
    },
    /// Name contains a path separator or NUL
    #[error("file name '{0}' must be a single path segment")]
    NotASegment(String),
    /// Name starts with a dot
    #[error("file name '{0}' cannot start with '.'")]
    Hidden(String),
    /// Name does not carry the archive suffix
    #[error("file name '{0}' must end with '{ext}'", ext = PKG_EXT)]
    NotAnArchive(String),
}

/// Check that `token` is a single visible path segment
pub fn validate_file_token(token: &str) -> Result<(), FileNameError> {
    if token.is_empty() {
        return Err(FileNameError::Empty);
    }
    if token.len() > MAX_FILE_NAME_LENGTH {
        return Err(FileNameError::TooLong {
            length: token.len(),
        });
    }
    if token.contains(['/', '\\', '\0']) {
        return Err(FileNameError::NotASegment(token.to_string()));
    }
    if token.starts_with('.') {
        return Err(FileNameError::Hidden(token.to_string()));
    }
    Ok(())
}

impl ArchiveFileName {
    /// Create a new ArchiveFileName, validating the input
    pub fn new(name: impl Into<String>) -> Result<Self, FileNameError> {
        let name = name.into();
        validate_file_token(&name)?;
        if !is_archive_file_name(&name) {
            return Err(FileNameError::NotAnArchive(name));
        }
        Ok(ArchiveFileName(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArchiveFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for ArchiveFileName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl fmt::Display for ArchiveFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ArchiveFileName {
    type Error = FileNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ArchiveFileName::new(value)
    }
}
