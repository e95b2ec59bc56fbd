//! Package Store Integration Tests
//!
//! End-to-end behavior of add/list/remove against a real branch directory,
//! with a recording index tool standing in for `repo-add`.

#[path = "../common/mod.rs"]
mod common;

mod add;
mod recovery;
mod remove;
