//! Error types for treeutil.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy and remove operations, and the [`Result`] type
//! alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`] |
//! | Validation | [`Error::SameFile`], [`Error::SpecialFile`], [`Error::IsADirectory`], [`Error::NotADirectory`], [`Error::NoFileName`] |
//! | Integrity | [`Error::CopyNotComplete`] |
//! | Symlinks | [`Error::DanglingSymlink`], [`Error::SymlinkLoop`] |
//! | Aggregate | [`Error::PartialTree`] |
//! | Removal | [`Error::Remove`] |
//! | Configuration | [`Error::Pattern`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for treeutil operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during copy and remove operations.
///
/// Domain errors carry the offending path(s). OS-level failures are passed
/// through unchanged as [`Error::Io`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source and destination are the same underlying file
    #[error("{} and {} are the same file", src.display(), dst.display())]
    SameFile {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },

    /// The path is a named pipe and cannot be copied
    #[error("`{}` is a named pipe", .0.display())]
    SpecialFile(PathBuf),

    /// Fewer bytes reached the destination than the source reported
    #[error("copy {} to {} not complete", src.display(), dst.display())]
    CopyNotComplete {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },

    /// Source is a directory, use `copy_tree` instead
    #[error("Source is a directory, use copy_tree instead: {}", .0.display())]
    IsADirectory(PathBuf),

    /// Source is not a directory
    #[error("Source is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The path has no final component to use as a file name
    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    /// A symlink in the source tree points at nothing
    #[error("Dangling symlink: {}", .0.display())]
    DanglingSymlink(PathBuf),

    /// Symlink loop detected (would cause infinite recursion)
    #[error("Symlink loop detected: {}", .0.display())]
    SymlinkLoop(PathBuf),

    /// Invalid ignore pattern
    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// One or more entries of a tree failed to copy
    ///
    /// The tree was traversed to the end; every failure is listed in
    /// visiting order.
    #[error("Failed to copy {} entries", failures.len())]
    PartialTree {
        /// Per-entry failures
        failures: Vec<TreeFailure>,
    },

    /// A step of a tree removal failed
    #[error("{op} failed on {}: {source}", path.display())]
    Remove {
        /// The operation that failed
        op: RemoveOp,
        /// The path the operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

/// A single entry that could not be copied during [`copy_tree`](crate::copy_tree).
#[derive(Debug)]
pub struct TreeFailure {
    /// Source path of the entry
    pub src: PathBuf,
    /// Destination path of the entry
    pub dst: PathBuf,
    /// Why the entry failed
    pub error: Error,
}

impl fmt::Display for TreeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.src.display(),
            self.dst.display(),
            self.error
        )
    }
}

/// Identifies the filesystem operation that failed during
/// [`rm_tree`](crate::rm_tree).
///
/// Passed to the `on_error` callback of [`RmTreeOptions`](crate::RmTreeOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoveOp {
    /// Reading entry metadata without following symlinks
    Lstat,
    /// Refusing to remove a tree whose root is a symlink
    IsSymlink,
    /// Listing a directory
    ReadDir,
    /// Unlinking a file or symlink
    RemoveFile,
    /// Removing an (emptied) directory
    RemoveDir,
}

impl RemoveOp {
    /// Stable identifier of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lstat => "lstat",
            Self::IsSymlink => "is_symlink",
            Self::ReadDir => "read_dir",
            Self::RemoveFile => "remove_file",
            Self::RemoveDir => "remove_dir",
        }
    }
}

impl fmt::Display for RemoveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
