//! Directory tree copy.
//!
//! [`copy_tree`] walks the source depth-first, one directory at a time. Each
//! directory is listed, filtered through the ignore callback, created at the
//! destination, and then its entries are copied in name order. Failures on
//! individual entries are collected instead of aborting the walk.

use crate::error::{Error, Result, TreeFailure};
use crate::options::{CopyOptions, CopyTreeOptions};
use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use super::stat::copy_stat;
use super::utils::{create_dir_all_with_mode, dir_key, symlink};

/// Recursively copy a directory tree.
///
/// `dst` and any missing parents are created with the permission mode of
/// `src`; an existing destination directory is merged into.
///
/// For every directory visited, the `ignore` callback (if any) is invoked
/// once with the directory and its entries; the names it returns are not
/// copied. Regular files are copied with `copy_function` (default
/// [`copy2`](crate::copy2)), called without per-file options.
///
/// Symbolic links are recreated when `symlinks` is true. Otherwise the
/// file or directory they point to is copied; a link whose target is missing
/// is reported as [`Error::DanglingSymlink`] unless
/// `ignore_dangling_symlinks` is set, in which case it is skipped.
///
/// After the entries of a directory are processed, its metadata is copied
/// with [`copy_stat`](crate::copy_stat).
///
/// # Returns
///
/// Returns `dst` once the whole tree has been copied.
///
/// # Errors
///
/// Returns an error without copying anything if:
/// - `src` cannot be inspected or listed ([`Error::Io`])
/// - `src` is not a directory ([`Error::NotADirectory`])
/// - `dst` cannot be created ([`Error::Io`])
///
/// Any other failure (a file that cannot be copied, an unreadable
/// subdirectory, a dangling symlink, a symlink loop, ...) is recorded and
/// the walk continues. If at least one was recorded, the result is
/// [`Error::PartialTree`] listing them all.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use treeutil::{copy_tree, ignore_patterns, CopyTreeOptions, Error};
///
/// let options = CopyTreeOptions::default().with_ignore(ignore_patterns(&["*.tmp"])?);
/// match copy_tree(Path::new("src"), Path::new("dst"), &options) {
///     Ok(dst) => println!("copied to {}", dst.display()),
///     Err(Error::PartialTree { failures }) => {
///         for failure in &failures {
///             eprintln!("{failure}");
///         }
///     }
///     Err(e) => return Err(e),
/// }
/// # Ok::<(), treeutil::Error>(())
/// ```
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyTreeOptions) -> Result<PathBuf> {
    let src_meta = fs::metadata(src)?;
    if !src_meta.is_dir() {
        return Err(Error::NotADirectory(src.to_path_buf()));
    }

    let mut walk = TreeWalk {
        options,
        failures: Vec::new(),
        ancestors: Vec::new(),
    };
    walk.copy_dir(src, dst, &src_meta)?;

    if walk.failures.is_empty() {
        Ok(dst.to_path_buf())
    } else {
        Err(Error::PartialTree {
            failures: walk.failures,
        })
    }
}

/// State carried through one [`copy_tree`] call.
struct TreeWalk<'a> {
    options: &'a CopyTreeOptions,
    failures: Vec<TreeFailure>,
    /// Keys of the directories on the current path, for loop detection
    ancestors: Vec<(u64, u64)>,
}

impl TreeWalk<'_> {
    /// Copy one directory. An `Err` means the directory itself could not be
    /// listed or created; entry failures are recorded instead.
    fn copy_dir(&mut self, src: &Path, dst: &Path, src_meta: &Metadata) -> Result<()> {
        let key = dir_key(src_meta, src)?;
        if self.ancestors.contains(&key) {
            return Err(Error::SymlinkLoop(src.to_path_buf()));
        }

        let mut entries = fs::read_dir(src)?.collect::<io::Result<Vec<DirEntry>>>()?;
        entries.sort_by_key(DirEntry::file_name);

        let ignored = self
            .options
            .ignore
            .as_ref()
            .map(|ignore| ignore.ignored(src, &entries))
            .unwrap_or_default();

        create_dir_all_with_mode(dst, src_meta)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            src = %src.display(),
            dst = %dst.display(),
            entries = entries.len(),
            ignored = ignored.len(),
            "copying directory"
        );

        self.ancestors.push(key);
        for entry in &entries {
            let name = entry.file_name();
            if ignored.contains(&name) {
                continue;
            }

            let src_path = entry.path();
            let dst_path = dst.join(&name);
            if let Err(error) = self.copy_entry(entry, &src_path, &dst_path) {
                self.record(src_path, dst_path, error);
            }
        }
        self.ancestors.pop();

        if let Err(error) = copy_stat(src, dst, None) {
            self.record(src.to_path_buf(), dst.to_path_buf(), error);
        }

        Ok(())
    }

    fn copy_entry(&mut self, entry: &DirEntry, src: &Path, dst: &Path) -> Result<()> {
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            return self.copy_symlink(src, dst);
        }

        if file_type.is_dir() {
            let meta = entry.metadata()?;
            return self.copy_dir(src, dst, &meta);
        }

        self.options.copy_function.copy(src, dst, None)?;
        Ok(())
    }

    fn copy_symlink(&mut self, src: &Path, dst: &Path) -> Result<()> {
        if self.options.symlinks {
            let target = fs::read_link(src)?;
            symlink(&target, dst)?;
            let no_follow = CopyOptions::default().without_follow_symlinks();
            return copy_stat(src, dst, Some(&no_follow));
        }

        let target_meta = match fs::metadata(src) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if self.options.ignore_dangling_symlinks {
                    self.options
                        .warn(&format!("Skipping dangling symlink {}", src.display()));
                    return Ok(());
                }
                return Err(Error::DanglingSymlink(src.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if target_meta.is_dir() {
            self.copy_dir(src, dst, &target_meta)
        } else {
            self.options.copy_function.copy(src, dst, None)?;
            Ok(())
        }
    }

    fn record(&mut self, src: PathBuf, dst: PathBuf, error: Error) {
        self.options
            .warn(&format!("Failed to copy {}: {}", src.display(), error));
        self.failures.push(TreeFailure { src, dst, error });
    }
}

// =============================================================================
// Tests
// =============================================================================
