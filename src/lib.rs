//! arpm - Arch Linux package repository store
//!
//! Manages a file-based package repository organized into named branches.
//! Each branch is a directory of `*.pkg.tar.zst` archives plus the binary
//! index (`<branch>.db.tar.gz`) the package manager reads.
//!
//! # Quick Start
//!
//! ```ignore
//! use arpm::{PackageStore, StoreConfig};
//!
//! let store = PackageStore::open(&StoreConfig::new("/srv/arpm"))?;
//! store.create_branch("core")?;
//!
//! let upload = std::fs::File::open("foo-1.0-1-x86_64.pkg.tar.zst")?;
//! let outcome = store.add("core", "foo-1.0-1-x86_64.pkg.tar.zst", upload)?;
//! println!("{} ({} replaced)", outcome.package_name, outcome.replaced.len());
//!
//! println!("{}", store.list("core")?);
//! store.remove("core", ["foo"])?;
//! ```
//!
//! # Architecture
//!
//! - `arpm-core`: error type, validated names, on-disk layout
//! - `arpm-package`: archive reading and the name index
//! - `arpm-engine`: configuration, locking, index rebuilds, the store

pub use arpm_core::{
    ArchiveFileName, BranchName, Error, ErrorKind, Result, INDEX_EXT, MAX_PKGINFO_BYTES,
    NO_ENTRIES, PKGINFO_ENTRY, PKGNAME_KEY, PKG_EXT,
};
pub use arpm_engine::logging;
pub use arpm_engine::{
    AddOutcome, BranchListing, BranchSummary, IndexTool, IndexToolError, Listing,
    PackageListing, PackageStore, RebuildOutcome, RemoveOutcome, RepoAdd, StoreConfig,
    CONFIG_FILE_NAME,
};
pub use arpm_package::{build_name_index, read_package_name, read_package_name_from_reader, NameIndex};
