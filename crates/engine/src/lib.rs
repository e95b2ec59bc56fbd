//! Package store engine for arpm
//!
//! This crate orchestrates the lower layers:
//! - PackageStore: branches, listings, add/remove with index consistency
//! - Rebuilder: regenerates a branch index through an IndexTool
//! - BranchLocks: per-branch serialization of mutations
//! - StoreConfig: `arpm.toml` configuration
//! - logging: subscriber setup for the service binary
//!
//! The engine is the only component that knows about:
//! - The external index tool
//! - Staging files and rollback of failed updates
//! - Locking

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod index_tool;
pub mod locks;
pub mod logging;
pub mod rebuild;
pub mod store;
pub mod testing;

pub use config::{StoreConfig, CONFIG_FILE_NAME};
pub use index_tool::{IndexTool, IndexToolError, RepoAdd};
pub use locks::BranchLocks;
pub use rebuild::{remove_index_files, RebuildOutcome, Rebuilder};
pub use store::{
    AddOutcome, BranchListing, BranchSummary, Listing, PackageListing, PackageStore,
    RemoveOutcome,
};
