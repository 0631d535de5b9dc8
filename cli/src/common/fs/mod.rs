//! # Sitekit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the commands:
//!
//! - **`copy`**: recursive directory copy (`fs_extra`), used to merge the
//!   template snapshot into the source tree.
//! - **`io`**: directory creation, whole-file read/write with context, and
//!   tolerant path removal.
//!
//! Callers import from the submodule, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Recursive directory copy (`copy_directory_contents`).
pub mod copy;
/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`, `write_string_to_file`, `remove_path_if_exists`).
pub mod io;
