//! # Scratch Directory Guard
//!
//! File: cli/src/commands/start/scratch.rs
//!
//! ## Overview
//!
//! The template snapshot lives in a uniquely named temporary directory that
//! must disappear on every exit path: success, any error, or the pipeline
//! future being dropped on Ctrl+C. `ScratchDir` owns a `tempfile::TempDir` and
//! removes it in `Drop`. Unlike a bare `TempDir`, a failed removal is logged
//! rather than silently ignored. It is never returned as an error, so it
//! cannot mask the failure that caused the unwind.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const SCRATCH_PREFIX: &str = "sitekit-template-";

pub struct ScratchDir {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl ScratchDir {
    /// Creates a fresh scratch directory under the system temp directory.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .context("Failed to create scratch directory for the template snapshot")?;
        debug!("Created scratch directory {}", dir.path().display());
        Ok(Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory now. Equivalent to dropping the guard.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!("Removed scratch directory {}", self.path.display()),
                Err(e) => warn!(
                    "Failed to remove scratch directory {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.release();
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_close_removes_directory() -> Result<()> {
        let scratch = ScratchDir::create()?;
        let path = scratch.path().to_path_buf();
        fs::create_dir_all(path.join("snapshot/styles"))?;
        fs::write(path.join("snapshot/styles/index.css"), "")?;

        assert!(path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(SCRATCH_PREFIX)));
        scratch.close();
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_drop_removes_directory() -> Result<()> {
        let scratch = ScratchDir::create()?;
        let path = scratch.path().to_path_buf();
        fs::write(path.join("partial"), "x")?;
        drop(scratch);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_two_scratch_dirs_are_distinct() -> Result<()> {
        let a = ScratchDir::create()?;
        let b = ScratchDir::create()?;
        assert_ne!(a.path(), b.path());
        Ok(())
    }
}
