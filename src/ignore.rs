//! Ignore callbacks for [`copy_tree`](crate::copy_tree).
//!
//! An [`Ignore`] is asked once per visited directory which of its entries
//! should be skipped. Closures with the matching signature implement the
//! trait; [`ignore_patterns`] builds one from glob patterns.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::DirEntry;
use std::path::Path;

/// Decides which entries of a directory are left out of a tree copy.
///
/// Called with the source directory being visited and its immediate
/// entries. Returns the names (relative to `dir`) to skip.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use std::ffi::OsString;
/// use std::fs::DirEntry;
/// use std::path::Path;
/// use treeutil::CopyTreeOptions;
///
/// // Skip everything larger than 1 MiB
/// let options = CopyTreeOptions::default().with_ignore(
///     |_dir: &Path, entries: &[DirEntry]| -> HashSet<OsString> {
///         entries
///             .iter()
///             .filter(|e| e.metadata().is_ok_and(|m| m.is_file() && m.len() > 1 << 20))
///             .map(DirEntry::file_name)
///             .collect()
///     },
/// );
/// ```
pub trait Ignore {
    /// Names within `dir` that must not be copied.
    fn ignored(&self, dir: &Path, entries: &[DirEntry]) -> HashSet<OsString>;
}

impl<F> Ignore for F
where
    F: Fn(&Path, &[DirEntry]) -> HashSet<OsString>,
{
    fn ignored(&self, dir: &Path, entries: &[DirEntry]) -> HashSet<OsString> {
        self(dir, entries)
    }
}

/// An [`Ignore`] that skips entries whose name matches any glob pattern.
///
/// Created by [`ignore_patterns`].
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: GlobSet,
}

impl IgnorePatterns {
    /// Whether a single entry name matches one of the patterns.
    pub fn is_match(&self, name: &std::ffi::OsStr) -> bool {
        self.patterns.is_match(Path::new(name))
    }
}

impl Ignore for IgnorePatterns {
    fn ignored(&self, _dir: &Path, entries: &[DirEntry]) -> HashSet<OsString> {
        entries
            .iter()
            .map(DirEntry::file_name)
            .filter(|name| self.is_match(name))
            .collect()
    }
}

/// Build an [`Ignore`] from glob-style patterns such as `*.pyc` or `tmp*`.
///
/// Patterns are matched against entry names only, never against the full
/// path, so `build` skips every directory or file named `build` at any
/// depth.
///
/// # Errors
///
/// Returns [`Error::Pattern`](crate::Error::Pattern) if a pattern is not a
/// valid glob.
///
/// # Example
///
/// ```
/// use treeutil::{ignore_patterns, CopyTreeOptions};
///
/// let options = CopyTreeOptions::default().with_ignore(ignore_patterns(&["*.pyc", "tmp*"])?);
/// # Ok::<(), treeutil::Error>(())
/// ```
pub fn ignore_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<IgnorePatterns> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern.as_ref())?);
    }
    Ok(IgnorePatterns {
        patterns: builder.build()?,
    })
}
