//! # Sitekit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the basic filesystem operations used by sitekit:
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing, and
//!   fails if the path exists but is not a directory.
//! - **`read_file_to_string`** / **`write_string_to_file`**: thin wrappers over
//!   `std::fs` that add path context to errors. Writing creates the parent directory.
//! - **`remove_path_if_exists`**: removes a file or a directory tree, treating
//!   an absent path as success. Used by the template prune step and `sitekit clean`.
//!
use crate::core::error::{Result, SitekitError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents (like `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(SitekitError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read, or if it is not
/// valid UTF-8, with context naming the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file path, overwriting if it exists.
///
/// The parent directory is created first when missing.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Removes a file, symlink or directory tree.
///
/// Returns `Ok(true)` if something was removed and `Ok(false)` if the path did not exist.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    // symlink_metadata so a dangling symlink still counts as present
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Nothing to remove at {:?}", path);
            return Ok(false);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("Failed to inspect {:?}", path)))
        }
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    info!("Removed {:?}", path);
    Ok(true)
}
