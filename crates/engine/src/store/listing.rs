//! Listing results
//!
//! An empty listing is an explicit value, distinct from failure, and renders
//! as `No entries.`.

use arpm_core::NO_ENTRIES;
use std::fmt;

/// Listing of a branch or of the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    /// Nothing to list
    Empty,
    /// At least one entry, sorted
    Entries(Vec<T>),
}

/// Archive file names of a branch
pub type PackageListing = Listing<String>;

/// Branches of the repository
pub type BranchListing = Listing<BranchSummary>;

impl<T> Listing<T> {
    /// `Empty` for an empty vector, `Entries` otherwise
    pub fn from_vec(entries: Vec<T>) -> Self {
        if entries.is_empty() {
            Listing::Empty
        } else {
            Listing::Entries(entries)
        }
    }

    /// True for the empty marker
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Entries as a slice (empty for the marker)
    pub fn entries(&self) -> &[T] {
        match self {
            Listing::Empty => &[],
            Listing::Entries(entries) => entries,
        }
    }

    /// Consume into a vector
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Empty => Vec::new(),
            Listing::Entries(entries) => entries,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Empty => f.write_str(NO_ENTRIES),
            Listing::Entries(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}", entry)?;
                }
                Ok(())
            }
        }
    }
}

/// One line of the branch listing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BranchSummary {
    /// Branch name
    pub name: String,
    /// Number of archive files in the branch
    pub archive_count: usize,
}

impl fmt::Display for BranchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} item(s)", self.name, self.archive_count)
    }
}
