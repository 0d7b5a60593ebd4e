//! Builder API for ergonomic tree copies.
//!
//! The builder pattern provides a fluent interface for configuring and executing
//! copy operations. This is often more convenient than manually constructing
//! [`CopyTreeOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use treeutil::CopyTreeBuilder;
//!
//! // Copy with defaults: follow symlinks, copy content and metadata
//! let dst = CopyTreeBuilder::new("src", "dst").run()?;
//! println!("Copied to {}", dst.display());
//! # Ok::<(), treeutil::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use treeutil::CopyTreeBuilder;
//!
//! let dst = CopyTreeBuilder::new("src", "dst")
//!     .symlinks()                       // Recreate symlinks
//!     .ignore_patterns(&["*.o", "*.a"])? // Skip build artifacts
//!     .content_only()                   // Don't copy metadata
//!     .run()?;
//! # Ok::<(), treeutil::Error>(())
//! ```

use crate::copy::{copy_file, copy_tree};
use crate::error::Result;
use crate::ignore::{Ignore, ignore_patterns};
use crate::options::{CopyFunction, CopyTreeOptions};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing tree copies.
///
/// `CopyTreeBuilder` provides a fluent interface that is often more ergonomic
/// than constructing [`CopyTreeOptions`] manually. It automatically detects
/// whether the source is a file or directory and calls the appropriate
/// function.
///
/// # Example
///
/// ```no_run
/// use treeutil::CopyTreeBuilder;
///
/// let dst = CopyTreeBuilder::new("/data/project", "/backup/project")
///     .ignore_patterns(&[".git", "target"])?
///     .ignore_dangling_symlinks()
///     .run()?;
/// # Ok::<(), treeutil::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyTreeBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyTreeOptions,
}

impl CopyTreeBuilder {
    /// Create a new `CopyTreeBuilder` with the given source and destination paths.
    ///
    /// Uses default options (follow symlinks, no ignore, copy with metadata).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyTreeOptions::default(),
        }
    }

    /// Recreate symlinks instead of copying what they point to.
    #[must_use]
    pub fn symlinks(mut self) -> Self {
        self.options = self.options.with_symlinks();
        self
    }

    /// Skip entries chosen by `ignore`, evaluated once per directory.
    #[must_use]
    pub fn ignore<I>(mut self, ignore: I) -> Self
    where
        I: Ignore + Send + Sync + 'static,
    {
        self.options = self.options.with_ignore(ignore);
        self
    }

    /// Skip entries whose name matches any of the glob `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if a pattern is invalid.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use treeutil::CopyTreeBuilder;
    ///
    /// let dst = CopyTreeBuilder::new("src", "dst")
    ///     .ignore_patterns(&["*.pyc", "__pycache__"])?
    ///     .run()?;
    /// # Ok::<(), treeutil::Error>(())
    /// ```
    pub fn ignore_patterns<S: AsRef<str>>(self, patterns: &[S]) -> Result<Self> {
        Ok(self.ignore(ignore_patterns(patterns)?))
    }

    /// Use a custom strategy to copy each file.
    #[must_use]
    pub fn copy_function<C>(mut self, copy_function: C) -> Self
    where
        C: CopyFunction + Send + Sync + 'static,
    {
        self.options = self.options.with_copy_function(copy_function);
        self
    }

    /// Copy file contents only, without permission bits or timestamps.
    ///
    /// Directory metadata is still copied.
    #[must_use]
    pub fn content_only(self) -> Self {
        self.copy_function(copy_file)
    }

    /// Skip symlinks whose target does not exist instead of failing on them.
    #[must_use]
    pub fn ignore_dangling_symlinks(mut self) -> Self {
        self.options = self.options.with_ignore_dangling_symlinks();
        self
    }

    /// Set a warning handler for non-fatal issues.
    ///
    /// The handler is called for every entry that fails to copy and every
    /// dangling symlink that is skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use treeutil::CopyTreeBuilder;
    ///
    /// let dst = CopyTreeBuilder::new("src", "dst")
    ///     .on_warning(|msg| eprintln!("Warning: {}", msg))
    ///     .run()?;
    /// # Ok::<(), treeutil::Error>(())
    /// ```
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyTreeOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// A directory source is copied with [`copy_tree`]. Any other source is
    /// copied with the configured copy function, so with the default
    /// strategy a destination directory receives the file under its own name.
    ///
    /// Returns the path that was written.
    ///
    /// # Errors
    ///
    /// Returns the error of [`copy_tree`] or of the copy function.
    pub fn run(self) -> Result<PathBuf> {
        if self.src.is_dir() {
            copy_tree(&self.src, &self.dst, &self.options)
        } else {
            self.options.copy_function.copy(&self.src, &self.dst, None)
        }
    }

    /// Execute the copy for a directory source only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`](crate::Error::NotADirectory) if the
    /// source is not a directory, or any error of [`copy_tree`].
    pub fn run_tree(self) -> Result<PathBuf> {
        copy_tree(&self.src, &self.dst, &self.options)
    }
}
