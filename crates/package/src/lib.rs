//! Package archive layer for arpm
//!
//! Everything that looks inside `.pkg.tar.zst` files lives here:
//!
//! - pkginfo: parser for the `key = value` control block
//! - reader: locates `.PKGINFO` in an archive and extracts the package name
//! - names: enumerates archives of a branch and groups them by package name
//! - testing: builders for fixture archives
//!
//! ## Archive Structure
//!
//! ```text
//! foo-1.0-1-x86_64.pkg.tar.zst
//! ├── .BUILDINFO
//! ├── .MTREE
//! ├── .PKGINFO      # pkgname = foo, pkgver = 1.0-1, ...
//! └── usr/...
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod names;
pub mod pkginfo;
pub mod reader;
pub mod testing;

pub use names::{build_name_index, list_archives, NameIndex};
pub use pkginfo::parse_pkgname;
pub use reader::{read_package_name, read_package_name_from_reader};
