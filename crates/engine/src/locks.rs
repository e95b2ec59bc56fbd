//! Per-branch mutation locks
//!
//! Every mutation of a branch (add, remove, explicit rebuild) runs while
//! holding that branch's mutex, including the index rebuild. Branches never
//! share a lock, and readers take none.

use arpm_core::BranchName;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Lock table keyed by branch name
#[derive(Debug, Default)]
pub struct BranchLocks {
    locks: DashMap<BranchName, Arc<Mutex<()>>>,
}

impl BranchLocks {
    /// Empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex guarding `branch`, created on first use
    pub fn lock_for(&self, branch: &BranchName) -> Arc<Mutex<()>> {
        // Clone out of the map so the shard guard is not held while waiting.
        self.locks
            .entry(branch.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Run `f` while holding the lock of `branch`
    pub fn with_lock<T>(&self, branch: &BranchName, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(branch);
        let _guard = match lock.try_lock() {
            Some(guard) => guard,
            None => {
                debug!(target: "arpm::store", branch = %branch, "Waiting for branch lock");
                lock.lock()
            }
        };
        f()
    }

    /// Number of branches that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// True if no branch has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
