//! Core copy and remove operations.
//!
//! This module provides the single-file operations ([`copy_file`],
//! [`copy_stat`], [`copy2`]) and the recursive tree operations
//! ([`copy_tree`], [`rm_tree`]).

mod file;
mod remove;
mod stat;
mod tree;
mod utils;

// Re-export public API
pub use file::{copy_file, copy2};
pub use remove::rm_tree;
pub use stat::copy_stat;
pub use tree::copy_tree;
