//! # Sitekit Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive directory copying, used to merge a rewritten template snapshot
//! into the project's source tree.
//!
//! ## Architecture
//!
//! `copy_directory_contents` uses `fs_extra` with `content_only` so the
//! *contents* of the source land directly in the target (not a nested copy of
//! the source directory itself), and `overwrite` so conflicting files in the
//! target are replaced. The copy is not transactional: if it fails midway,
//! files copied so far stay in place.
//!
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

/// Copies everything inside `source` into `target`, overwriting conflicts.
///
/// `target` is created if it does not exist.
///
/// # Errors
///
/// Returns an `Err` if the source cannot be read, the target cannot be
/// created, or any file fails to copy.
pub fn copy_directory_contents(source: &Path, target: &Path) -> Result<()> {
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_contents_creates_target_and_overwrites() -> Result<()> {
        let source = tempdir()?;
        let target_root = tempdir()?;
        let target = target_root.path().join("src");

        fs::create_dir_all(source.path().join("styles"))?;
        fs::write(source.path().join("index.html"), "new")?;
        fs::write(source.path().join("styles/_reset.css"), "* {}")?;

        copy_directory_contents(source.path(), &target)?;
        assert_eq!(fs::read_to_string(target.join("index.html"))?, "new");
        assert!(target.join("styles/_reset.css").is_file());

        // Existing files are replaced, unrelated files are kept.
        fs::write(target.join("index.html"), "old")?;
        fs::write(target.join("keep.txt"), "mine")?;
        copy_directory_contents(source.path(), &target)?;
        assert_eq!(fs::read_to_string(target.join("index.html"))?, "new");
        assert_eq!(fs::read_to_string(target.join("keep.txt"))?, "mine");
        Ok(())
    }

    #[test]
    fn test_copy_missing_source_fails() -> Result<()> {
        let root = tempdir()?;
        let result = copy_directory_contents(&root.path().join("absent"), &root.path().join("dst"));
        assert!(result.is_err());
        Ok(())
    }
}
