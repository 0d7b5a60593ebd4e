//! # treeutil
//!
//! Recursive filesystem tree operations for Rust, modeled after the file
//! utilities found in scripting-language standard libraries.
//!
//! ## Operations
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`copy_file`] | Copy a file's bytes, or recreate a symlink |
//! | [`copy_stat`] | Copy permission bits and access/modification times |
//! | [`copy2`] | [`copy_file`] followed by [`copy_stat`]; destination may be a directory |
//! | [`copy_tree`] | Recursively copy a directory tree |
//! | [`rm_tree`] | Recursively delete a directory tree |
//!
//! ## Quick Start
//!
//! ```no_run
//! use treeutil::CopyTreeBuilder;
//!
//! let dst = CopyTreeBuilder::new("project", "backup")
//!     .ignore_patterns(&["*.pyc", "target"])?
//!     .symlinks()
//!     .run()?;
//! println!("Copied to {}", dst.display());
//! # Ok::<(), treeutil::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use std::path::Path;
//! use treeutil::{copy_file, copy_tree, rm_tree, CopyTreeOptions, RmTreeOptions};
//!
//! // Copy only file contents for every file in the tree
//! let options = CopyTreeOptions::default().with_copy_function(copy_file);
//! copy_tree(Path::new("src"), Path::new("dst"), &options)?;
//!
//! // Remove it again, ignoring anything that cannot be deleted
//! rm_tree(Path::new("dst"), RmTreeOptions::default().with_ignore_errors())?;
//! # Ok::<(), treeutil::Error>(())
//! ```
//!
//! ## Failure Model
//!
//! Every operation is synchronous. [`copy_file`], [`copy_stat`] and [`copy2`]
//! stop at the first error. [`copy_tree`] only stops early when the root
//! cannot be read or the destination root cannot be created; every other
//! failure is collected and returned as [`Error::PartialTree`] once the whole
//! tree has been visited.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod ignore;
mod options;

pub use builder::CopyTreeBuilder;
pub use copy::{copy_file, copy_stat, copy_tree, copy2, rm_tree};
pub use error::{Error, RemoveOp, Result, TreeFailure};
pub use ignore::{Ignore, IgnorePatterns, ignore_patterns};
pub use options::{CopyFunction, CopyOptions, CopyTreeOptions, OnError, RmTreeOptions};
