//! Validated names
//!
//! Branch names and file names come straight from requests and end up as
//! path segments, so they are validated once at the edge and carried as
//! newtypes afterwards.

pub mod branch_name;
pub mod file_name;

pub use branch_name::{BranchName, BranchNameError, MAX_BRANCH_NAME_LENGTH};
pub use file_name::{validate_file_token, ArchiveFileName, FileNameError, MAX_FILE_NAME_LENGTH};
