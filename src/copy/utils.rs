//! Utility functions for copy and remove operations.
//!
//! This module contains helpers shared by the file, stat, tree and remove
//! operations: content transfer, file identity, special-file detection and
//! the platform-specific metadata primitives.

use crate::error::{Error, Result};
use filetime::{FileTime, set_file_times, set_symlink_file_times};
use std::fs::{self, File, Metadata};
use std::io::{self, Read, Write};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

// =============================================================================
// File content copying
// =============================================================================

/// Copy file contents using the best available method.
///
/// On Linux 4.5+, uses `copy_file_range` for zero-copy kernel-to-kernel transfer.
/// Falls back to [`copy_stream`] on other platforms or on error.
///
/// `len` is only a hint: the source is always read to end-of-file. Returns
/// the number of bytes that reached `dst`, which differs from `len` when the
/// source holds more or less than it reported or the destination stops
/// accepting data.
pub(crate) fn copy_file_contents(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = len;
        copy_stream(&mut &*src, &mut &*dst)
    }
}

/// Linux-specific: copy using copy_file_range(2) syscall.
///
/// Falls back to [`copy_stream`] if copy_file_range fails before moving any
/// data (e.g., cross-filesystem). Whatever lies past `len` (procfs files
/// report 0, a file may grow) is drained with [`copy_stream`].
#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut remaining = len;
    let mut copied: u64 = 0;

    while remaining > 0 {
        let chunk_size = remaining.min(128 * 1024 * 1024) as usize; // 128MB chunks

        // SAFETY: both descriptors are open for the lifetime of the borrows and
        // null offsets make the kernel use (and advance) the file positions.
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                chunk_size,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            // EXDEV: cross-device, ENOSYS: not supported, EINVAL: fs doesn't support it
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV)
                        | Some(libc::ENOSYS)
                        | Some(libc::EINVAL)
                        | Some(libc::EOPNOTSUPP)
                )
            {
                return copy_stream(&mut &*src, &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            // Source shrank underneath us
            break;
        }

        let bytes_copied = result as u64;
        copied += bytes_copied;
        remaining = remaining.saturating_sub(bytes_copied);
    }

    // Both file positions were advanced by the kernel
    copied += copy_stream(&mut &*src, &mut &*dst)?;

    Ok(copied)
}

/// Stream every byte from `reader` into `writer`.
///
/// Unlike [`io::copy`], a writer that accepts zero bytes ends the transfer
/// instead of raising [`io::ErrorKind::WriteZero`]; the short count is
/// returned so the caller can compare it with the expected size.
pub(crate) fn copy_stream<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; BUF_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let mut offset = 0;
        while offset < n {
            match writer.write(&buf[offset..n]) {
                Ok(0) => return Ok(written),
                Ok(k) => {
                    offset += k;
                    written += k as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    writer.flush()?;
    Ok(written)
}

/// Fail with [`Error::CopyNotComplete`] unless `copied` equals `expected`.
pub(crate) fn ensure_complete(copied: u64, expected: u64, src: &Path, dst: &Path) -> Result<()> {
    if copied == expected {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(
        "{}: {}/{} bytes copied",
        src.display(),
        copied,
        expected
    );

    Err(Error::CopyNotComplete {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
    })
}

// =============================================================================
// File type and identity
// =============================================================================

/// Whether the metadata describes a named pipe.
#[cfg(unix)]
#[inline]
pub(crate) fn is_fifo(meta: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    meta.file_type().is_fifo()
}

#[cfg(not(unix))]
#[inline]
pub(crate) fn is_fifo(_meta: &Metadata) -> bool {
    false
}

/// Helper to check if path is a symlink without following it
#[inline]
pub(crate) fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Whether `a` and `b` refer to the same underlying file.
///
/// Compares device and inode on Unix, so hard links and aliased paths are
/// detected. Both paths are resolved through symlinks.
#[cfg(unix)]
pub(crate) fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let a_meta = fs::metadata(a)?;
    let b_meta = fs::metadata(b)?;
    Ok(a_meta.dev() == b_meta.dev() && a_meta.ino() == b_meta.ino())
}

#[cfg(not(unix))]
pub(crate) fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    // Fallback: compare canonicalized paths (misses hard links)
    Ok(a.canonicalize()? == b.canonicalize()?)
}

/// Get a unique key for a directory based on device and inode.
///
/// Used to detect symlink loops while following symlinked directories.
/// On non-Unix platforms, falls back to a hash of the canonical path.
#[cfg(unix)]
pub(crate) fn dir_key(meta: &Metadata, _path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn dir_key(_meta: &Metadata, path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}

#[cfg(unix)]
pub(crate) use std::os::unix::fs::symlink;

#[cfg(not(unix))]
pub(crate) fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Symlinks not supported on this platform",
    ))
}

// =============================================================================
// Metadata
// =============================================================================

/// Copy access and modification times from `src_meta` onto `dst`.
///
/// With `follow` false, `dst` itself is updated even if it is a symlink.
pub(crate) fn apply_timestamps(src_meta: &Metadata, dst: &Path, follow: bool) -> io::Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    if follow {
        set_file_times(dst, atime, mtime)
    } else {
        set_symlink_file_times(dst, atime, mtime)
    }
}

/// Copy permission bits from `src_meta` onto `dst`.
///
/// Linux has no `lchmod`, so a symlink's own mode is left alone when
/// `follow` is false.
pub(crate) fn apply_permissions(src_meta: &Metadata, dst: &Path, follow: bool) -> io::Result<()> {
    if !follow && src_meta.file_type().is_symlink() {
        return Ok(());
    }
    fs::set_permissions(dst, src_meta.permissions())
}

/// Create `dst` and any missing parents with the permission mode of the
/// source directory.
///
/// The owner always gets `rwx` so the directory can be filled; the exact
/// mode is applied afterwards by [`copy_stat`](crate::copy_stat).
#[cfg(unix)]
pub(crate) fn create_dir_all_with_mode(dst: &Path, src_meta: &Metadata) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
    fs::DirBuilder::new()
        .recursive(true)
        .mode(src_meta.permissions().mode() | 0o700)
        .create(dst)
}

#[cfg(not(unix))]
pub(crate) fn create_dir_all_with_mode(dst: &Path, _src_meta: &Metadata) -> io::Result<()> {
    fs::create_dir_all(dst)
}

// =============================================================================
// Tests
// =============================================================================
