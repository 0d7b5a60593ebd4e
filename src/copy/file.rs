//! Single file copy operations.
//!
//! This module provides [`copy_file`] (content only, or symlink recreation)
//! and [`copy2`] (content plus metadata, directory-aware destination).

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::stat::copy_stat;
use super::utils::{copy_file_contents, ensure_complete, is_fifo, same_file, symlink};

/// Copy the data of `src` to `dst`.
///
/// If `follow_symlinks` is false and `src` is a symbolic link, a new symlink
/// with the same target is created at `dst` instead of copying the file it
/// points to. Options default to following symlinks.
///
/// The destination is created or truncated. If an error occurs after it was
/// created, the partially written file is left in place.
///
/// # Returns
///
/// Returns `dst` on success.
///
/// # Errors
///
/// Returns an error if:
/// - `src` or an existing `dst` is a named pipe ([`Error::SpecialFile`])
/// - `src` and `dst` are the same underlying file ([`Error::SameFile`])
/// - Source is a directory ([`Error::IsADirectory`])
/// - Fewer bytes were written than the source holds ([`Error::CopyNotComplete`])
/// - IO operations fail ([`Error::Io`])
pub fn copy_file(src: &Path, dst: &Path, options: Option<&CopyOptions>) -> Result<PathBuf> {
    let follow = CopyOptions::follow(options);

    // Without following, a symlink source is described by the link itself
    let src_meta = if follow {
        fs::metadata(src)?
    } else {
        fs::symlink_metadata(src)?
    };

    if is_fifo(&src_meta) {
        return Err(Error::SpecialFile(src.to_path_buf()));
    }

    match fs::metadata(dst) {
        Ok(dst_meta) => {
            if same_file(src, dst)? {
                return Err(Error::SameFile {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                });
            }
            if is_fifo(&dst_meta) {
                return Err(Error::SpecialFile(dst.to_path_buf()));
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if src_meta.file_type().is_symlink() {
        let target = fs::read_link(src)?;
        symlink(&target, dst)?;
        return Ok(dst.to_path_buf());
    }

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }

    let src_file = File::open(src)?;
    let dst_file = File::create(dst)?;

    let copied = copy_file_contents(&src_file, &dst_file, src_meta.len())?;
    ensure_complete(copied, src_meta.len(), src, dst)?;

    Ok(dst.to_path_buf())
}

/// Copy data and metadata, like `cp -p src dst`.
///
/// The destination may be a directory, in which case the file is copied
/// into it under the base name of `src`. Content is copied with
/// [`copy_file`] and metadata with [`copy_stat`], both using the same
/// symlink policy.
///
/// # Returns
///
/// Returns the path the file was written to.
///
/// # Errors
///
/// Returns the first error from either step, or [`Error::NoFileName`] if
/// `dst` is a directory and `src` has no final component.
pub fn copy2(src: &Path, dst: &Path, options: Option<&CopyOptions>) -> Result<PathBuf> {
    let dst = if dst.is_dir() {
        let name = src
            .file_name()
            .ok_or_else(|| Error::NoFileName(src.to_path_buf()))?;
        dst.join(name)
    } else {
        dst.to_path_buf()
    };

    copy_file(src, &dst, options)?;
    copy_stat(src, &dst, options)?;

    Ok(dst)
}

// =============================================================================
// Tests
// =============================================================================
