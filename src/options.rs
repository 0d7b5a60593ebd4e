//! Configuration options for copy and remove operations.
//!
//! This module provides [`CopyOptions`] for single-file operations,
//! [`CopyTreeOptions`] for [`copy_tree`](crate::copy_tree), and
//! [`RmTreeOptions`] for [`rm_tree`](crate::rm_tree), along with the
//! [`CopyFunction`] strategy used to copy each file of a tree.
//!
//! # Example
//!
//! ```
//! use treeutil::{copy_file, CopyTreeOptions};
//!
//! let options = CopyTreeOptions::default()
//!     .with_symlinks()
//!     .with_ignore_dangling_symlinks()
//!     .with_copy_function(copy_file);
//! ```

use crate::error::{RemoveOp, Result};
use crate::ignore::Ignore;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for single-file operations.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `follow_symlinks` | `true` | Copy the content a symlink points to |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Whether to follow symlinks (default: true)
    ///
    /// If false and the source is a symbolic link, the link itself is
    /// recreated at the destination instead of copying what it points to.
    pub follow_symlinks: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
        }
    }
}

impl CopyOptions {
    /// Recreate symlinks instead of following them
    #[must_use]
    pub fn without_follow_symlinks(mut self) -> Self {
        self.follow_symlinks = false;
        self
    }

    /// Resolve the effective symlink policy of optional options.
    pub(crate) fn follow(options: Option<&Self>) -> bool {
        options.is_none_or(|o| o.follow_symlinks)
    }
}

/// Strategy used by [`copy_tree`](crate::copy_tree) to copy each file.
///
/// Any function or closure with the signature of [`copy_file`](crate::copy_file)
/// implements this trait, so both [`copy_file`](crate::copy_file) (content
/// only) and [`copy2`](crate::copy2) (content and metadata) can be used
/// directly.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use treeutil::{copy2, CopyOptions, CopyTreeOptions};
///
/// let options = CopyTreeOptions::default().with_copy_function(
///     |src: &Path, dst: &Path, opts: Option<&CopyOptions>| -> treeutil::Result<PathBuf> {
///         println!("copying {}", src.display());
///         copy2(src, dst, opts)
///     },
/// );
/// ```
pub trait CopyFunction {
    /// Copy `src` to `dst`, returning the path that was written.
    fn copy(&self, src: &Path, dst: &Path, options: Option<&CopyOptions>) -> Result<PathBuf>;
}

impl<F> CopyFunction for F
where
    F: Fn(&Path, &Path, Option<&CopyOptions>) -> Result<PathBuf>,
{
    fn copy(&self, src: &Path, dst: &Path, options: Option<&CopyOptions>) -> Result<PathBuf> {
        self(src, dst, options)
    }
}

/// Options for [`copy_tree`](crate::copy_tree).
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `symlinks` | `false` | Follow symlinks and copy their targets |
/// | `ignore` | `None` | Copy every entry |
/// | `copy_function` | [`copy2`](crate::copy2) | Copy content and metadata |
/// | `ignore_dangling_symlinks` | `false` | Report dangling symlinks as failures |
/// | `warn_handler` | `None` | Warnings go to tracing (if enabled) |
#[derive(Clone)]
pub struct CopyTreeOptions {
    /// Recreate symlinks as symlinks (default: false)
    ///
    /// If false, the file or directory a symlink points to is copied.
    pub symlinks: bool,

    /// Names to skip, computed once per visited directory
    pub ignore: Option<Arc<dyn Ignore + Send + Sync>>,

    /// Strategy used to copy each regular file
    pub copy_function: Arc<dyn CopyFunction + Send + Sync>,

    /// Silently skip symlinks whose target is missing (default: false)
    ///
    /// Only has an effect when `symlinks` is false.
    pub ignore_dangling_symlinks: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyTreeOptions {
    fn default() -> Self {
        Self {
            symlinks: false,
            ignore: None,
            copy_function: Arc::new(crate::copy::copy2),
            ignore_dangling_symlinks: false,
            warn_handler: None,
        }
    }
}

impl fmt::Debug for CopyTreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyTreeOptions")
            .field("symlinks", &self.symlinks)
            .field("ignore", &self.ignore.as_ref().map(|_| "<ignore>"))
            .field("copy_function", &"<copy function>")
            .field("ignore_dangling_symlinks", &self.ignore_dangling_symlinks)
            .field("warn_handler", &self.warn_handler)
            .finish()
    }
}

impl CopyTreeOptions {
    /// Recreate symlinks in the destination tree instead of following them
    #[must_use]
    pub fn with_symlinks(mut self) -> Self {
        self.symlinks = true;
        self
    }

    /// Set the ignore callback
    #[must_use]
    pub fn with_ignore<I>(mut self, ignore: I) -> Self
    where
        I: Ignore + Send + Sync + 'static,
    {
        self.ignore = Some(Arc::new(ignore));
        self
    }

    /// Set the per-file copy strategy
    #[must_use]
    pub fn with_copy_function<C>(mut self, copy_function: C) -> Self
    where
        C: CopyFunction + Send + Sync + 'static,
    {
        self.copy_function = Arc::new(copy_function);
        self
    }

    /// Skip dangling symlinks instead of reporting them
    #[must_use]
    pub fn with_ignore_dangling_symlinks(mut self) -> Self {
        self.ignore_dangling_symlinks = true;
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}

/// Error callback for [`rm_tree`](crate::rm_tree).
///
/// Receives the failing operation, the path it was applied to, and the
/// underlying error.
pub type OnError<'a> = Box<dyn FnMut(RemoveOp, &Path, &io::Error) + 'a>;

/// Options for [`rm_tree`](crate::rm_tree).
///
/// With neither field set, the first failure stops the removal and is
/// returned as [`Error::Remove`](crate::Error::Remove).
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use treeutil::{rm_tree, RmTreeOptions};
///
/// let mut failed = Vec::new();
/// rm_tree(
///     Path::new("build"),
///     RmTreeOptions::default().with_on_error(|op, path, err| {
///         failed.push(format!("{op} {}: {err}", path.display()));
///     }),
/// )?;
/// # Ok::<(), treeutil::Error>(())
/// ```
#[derive(Default)]
pub struct RmTreeOptions<'a> {
    /// Skip every failure silently (default: false)
    ///
    /// Takes precedence over `on_error`.
    pub ignore_errors: bool,

    /// Called for each failure instead of stopping (optional)
    pub on_error: Option<OnError<'a>>,
}

impl fmt::Debug for RmTreeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RmTreeOptions")
            .field("ignore_errors", &self.ignore_errors)
            .field("on_error", &self.on_error.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl<'a> RmTreeOptions<'a> {
    /// Ignore every failure
    #[must_use]
    pub fn with_ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Report failures to `handler` and keep going
    #[must_use]
    pub fn with_on_error<F>(mut self, handler: F) -> Self
    where
        F: FnMut(RemoveOp, &Path, &io::Error) + 'a,
    {
        self.on_error = Some(Box::new(handler));
        self
    }
}
