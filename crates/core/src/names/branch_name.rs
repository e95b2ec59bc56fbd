//! Branch names
//!
//! A branch is a directory directly under the repository root and its name
//! is also the prefix of its index files, so a valid name must be usable as
//! both `<root>/<branch>` and `<branch>.db.tar.gz`.

use crate::layout::{INDEX_EXT, PKG_EXT};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest branch name whose index file still fits in a 255-byte file name
pub const MAX_BRANCH_NAME_LENGTH: usize = 255 - INDEX_EXT.len();

/// Name of a branch directory
///
/// Accepted: ASCII letters, digits, `_`, `-` and `.`, starting with a
/// letter, digit or `_`, and not ending in the archive suffix.
///
/// ```text
/// core, extra-testing, x86_64.stable   ok
/// "", -core, .hidden, .., a/b          rejected
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

/// Why a string is not a branch name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchNameError {
    /// Nothing to name the directory with
    #[error("branch name cannot be empty")]
    Empty,
    /// Index file name would exceed the filesystem limit
    #[error("branch name is {0} bytes, at most {max} allowed", max = MAX_BRANCH_NAME_LENGTH)]
    TooLong(usize),
    /// First character would make the directory hidden or look like a flag
    #[error("branch name cannot start with '{0}'")]
    BadLeadingChar(char),
    /// Character outside `[A-Za-z0-9_.-]`
    #[error("branch name contains '{ch}' at byte {index}")]
    BadChar {
        /// Offending character
        ch: char,
        /// Byte offset of `ch`
        index: usize,
    },
    /// Name would be listed as a package archive
    #[error("branch name cannot end with '{ext}'", ext = PKG_EXT)]
    LooksLikeArchive,
}

impl BranchName {
    /// Validate and wrap `name`
    pub fn new(name: impl Into<String>) -> Result<Self, BranchNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(BranchName(name))
    }

    /// Check `name` without allocating
    pub fn validate(name: &str) -> Result<(), BranchNameError> {
        let lead = name.chars().next().ok_or(BranchNameError::Empty)?;
        if name.len() > MAX_BRANCH_NAME_LENGTH {
            return Err(BranchNameError::TooLong(name.len()));
        }
        if lead != '_' && !lead.is_ascii_alphanumeric() {
            return Err(BranchNameError::BadLeadingChar(lead));
        }
        if let Some((index, ch)) = name
            .char_indices()
            .find(|&(_, ch)| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')))
        {
            return Err(BranchNameError::BadChar { ch, index });
        }
        if name.ends_with(PKG_EXT) {
            return Err(BranchNameError::LooksLikeArchive);
        }
        Ok(())
    }

    /// Borrow the name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the name
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BranchName {
    type Error = BranchNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BranchName::new(value)
    }
}

impl TryFrom<&str> for BranchName {
    type Error = BranchNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BranchName::new(value)
    }
}

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}
