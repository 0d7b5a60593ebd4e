//! Metadata propagation.

use crate::error::Result;
use crate::options::CopyOptions;
use std::fs;
use std::path::Path;

use super::utils::{apply_permissions, apply_timestamps, is_symlink};

/// Copy permission bits and access/modification times from `src` to `dst`.
///
/// If `follow_symlinks` is false, symlinks are not followed if and only if
/// both `src` and `dst` are symlinks; the link timestamps are then updated
/// in place and permission bits are left alone on platforms without
/// `lchmod`. In every other case both paths are resolved through symlinks.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if `src` cannot be inspected or
/// `dst` cannot be updated.
pub fn copy_stat(src: &Path, dst: &Path, options: Option<&CopyOptions>) -> Result<()> {
    let follow = CopyOptions::follow(options) || !(is_symlink(src) && is_symlink(dst));

    let src_meta = if follow {
        fs::metadata(src)?
    } else {
        fs::symlink_metadata(src)?
    };

    apply_timestamps(&src_meta, dst, follow)?;
    apply_permissions(&src_meta, dst, follow)?;

    Ok(())
}
