//! Recursive tree removal.

use crate::error::{Error, RemoveOp, Result};
use crate::options::RmTreeOptions;
use std::fs;
use std::io;
use std::path::Path;

/// Recursively delete a directory tree.
///
/// Children are removed before their parent. Symlinks inside the tree are
/// unlinked, never followed. Calling it on a symlink is refused and reported
/// as a [`RemoveOp::IsSymlink`] failure.
///
/// Failures are handled according to `options`:
/// - `ignore_errors`: skipped silently, removal continues;
/// - `on_error`: passed to the callback (operation, path, error), removal
///   continues;
/// - neither: the first failure stops the removal.
///
/// # Errors
///
/// Returns [`Error::Remove`] with the failing operation and path when no
/// error policy is configured.
pub fn rm_tree(path: &Path, options: RmTreeOptions<'_>) -> Result<()> {
    let mut remover = TreeRemover { options };

    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => return remover.fail(RemoveOp::Lstat, path, e),
    };
    if meta.file_type().is_symlink() {
        let e = io::Error::other("Cannot call rm_tree on a symbolic link");
        return remover.fail(RemoveOp::IsSymlink, path, e);
    }

    remover.remove_dir(path)
}

struct TreeRemover<'a> {
    options: RmTreeOptions<'a>,
}

impl TreeRemover<'_> {
    fn remove_dir(&mut self, path: &Path) -> Result<()> {
        match fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(e) => {
                            self.fail(RemoveOp::ReadDir, path, e)?;
                            continue;
                        }
                    };
                    let child = entry.path();

                    let is_dir = match entry.file_type() {
                        Ok(ft) => ft.is_dir(),
                        Err(e) => {
                            self.fail(RemoveOp::Lstat, &child, e)?;
                            continue;
                        }
                    };

                    if is_dir {
                        self.remove_dir(&child)?;
                    } else if let Err(e) = fs::remove_file(&child) {
                        self.fail(RemoveOp::RemoveFile, &child, e)?;
                    }
                }
            }
            Err(e) => self.fail(RemoveOp::ReadDir, path, e)?,
        }

        if let Err(e) = fs::remove_dir(path) {
            self.fail(RemoveOp::RemoveDir, path, e)?;
        }
        Ok(())
    }

    /// Apply the error policy. `Ok` means keep going.
    fn fail(&mut self, op: RemoveOp, path: &Path, error: io::Error) -> Result<()> {
        if self.options.ignore_errors {
            return Ok(());
        }
        if let Some(on_error) = self.options.on_error.as_mut() {
            on_error(op, path, &error);
            return Ok(());
        }
        Err(Error::Remove {
            op,
            path: path.to_path_buf(),
            source: error,
        })
    }
}
