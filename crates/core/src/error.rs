//! Error types for arpm
//!
//! Every layer reports failures through [`Error`]. Each variant maps to one
//! [`ErrorKind`] so a transport layer can turn failures into distinct statuses
//! without matching on messages.

use crate::names::{BranchNameError, FileNameError};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for arpm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for arpm
#[derive(Debug, Error)]
pub enum Error {
    /// Open/create/rename/delete failure
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Decompression or tar stream could not be read
    #[error("Format error in '{}': {reason}", path.display())]
    Format {
        /// Archive path
        path: PathBuf,
        /// What failed
        reason: String,
    },

    /// Metadata entry is present but unusable (empty or oversized)
    #[error("Corrupt archive '{}': {reason}", path.display())]
    CorruptArchive {
        /// Archive path
        path: PathBuf,
        /// What is wrong with the metadata entry
        reason: String,
    },

    /// Metadata entry or package name key is missing
    #[error("Not found in '{}': {reason}", path.display())]
    NotFound {
        /// Archive path
        path: PathBuf,
        /// What was not found
        reason: String,
    },

    /// Uploaded content is not a usable package archive
    #[error("Invalid package '{name}': {source}")]
    InvalidPackage {
        /// File name the upload was meant to have
        name: String,
        /// Extraction failure
        #[source]
        source: Box<Error>,
    },

    /// The external index tool is missing or failed
    #[error("Unable to rebuild index of branch '{branch}': {reason}")]
    IndexRebuild {
        /// Branch whose index was being rebuilt
        branch: String,
        /// Summary of the failure
        reason: String,
        /// Combined stdout/stderr of the tool, kept for diagnostics
        output: String,
    },

    /// Branch directory does not exist
    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    /// Requested file does not exist in the branch
    #[error("No such file '{file}' in branch '{branch}'")]
    FileNotFound {
        /// Branch name
        branch: String,
        /// Requested file name
        file: String,
    },

    /// Branch name, file name or removal token is not acceptable
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Classification of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Io`]
    Io,
    /// See [`Error::Format`]
    Format,
    /// See [`Error::CorruptArchive`]
    CorruptArchive,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::InvalidPackage`]
    InvalidPackage,
    /// See [`Error::IndexRebuild`]
    IndexRebuild,
    /// See [`Error::BranchNotFound`]
    BranchNotFound,
    /// See [`Error::FileNotFound`]
    FileNotFound,
    /// See [`Error::InvalidName`]
    InvalidName,
    /// See [`Error::Config`]
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Io => "io",
            ErrorKind::Format => "format",
            ErrorKind::CorruptArchive => "corrupt_archive",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidPackage => "invalid_package",
            ErrorKind::IndexRebuild => "index_rebuild",
            ErrorKind::BranchNotFound => "branch_not_found",
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Create an I/O error bound to a path
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a format error
    pub fn format(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a corrupt archive error
    pub fn corrupt(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Wrap an extraction failure of an uploaded file
    pub fn invalid_package(name: impl Into<String>, source: Error) -> Self {
        Self::InvalidPackage {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create an index rebuild error
    pub fn index_rebuild(
        branch: impl Into<String>,
        reason: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::IndexRebuild {
            branch: branch.into(),
            reason: reason.into(),
            output: output.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::Format { .. } => ErrorKind::Format,
            Error::CorruptArchive { .. } => ErrorKind::CorruptArchive,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidPackage { .. } => ErrorKind::InvalidPackage,
            Error::IndexRebuild { .. } => ErrorKind::IndexRebuild,
            Error::BranchNotFound(_) => ErrorKind::BranchNotFound,
            Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Error::InvalidName(_) => ErrorKind::InvalidName,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<BranchNameError> for Error {
    fn from(e: BranchNameError) -> Self {
        Error::InvalidName(e.to_string())
    }
}

impl From<FileNameError> for Error {
    fn from(e: FileNameError) -> Self {
        Error::InvalidName(e.to_string())
    }
}
