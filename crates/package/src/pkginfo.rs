//! `.PKGINFO` control block parser
//!
//! The block is a list of `key = value` lines written by `makepkg`:
//!
//! ```text
//! # Generated by makepkg 6.0.2
//! pkgname = foo
//! pkgbase = foo
//! pkgver = 1.0-1
//! ```

use arpm_core::PKGNAME_KEY;

/// Value of the first line whose key is `key`
///
/// Keys and values are trimmed on both sides of the first `=`. Blank lines,
/// comments and lines without `=` are skipped. Matching is case-sensitive.
pub fn find_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim())
}

/// Logical package name declared by a control block
///
/// Returns `None` if the block has no `pkgname` line or the first one is
/// empty.
pub fn parse_pkgname(content: &str) -> Option<&str> {
    find_value(content, PKGNAME_KEY).filter(|name| !name.is_empty())
}
