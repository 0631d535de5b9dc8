//! # Style Partial Normalization
//!
//! File: cli/src/commands/start/styles.rs
//!
//! ## Overview
//!
//! Renames the `.css` files directly under a template's `styles/` directory so
//! the generator's Sass pipeline treats them correctly:
//!
//! - `index.css` is promoted to the stylesheet entry point `index.scss`.
//! - every other `name.css` becomes the partial `_name.css`.
//!
//! Files already starting with `_` and the promoted `index.scss` (not `.css`)
//! are left alone, so running the step twice changes nothing. A rename whose
//! target already exists is skipped with a warning rather than overwriting.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the promoted stylesheet entry point.
pub const STYLESHEET_ENTRY_POINT: &str = "index.scss";

/// Result of one normalization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StyleOutcome {
    /// `(from, to)` pairs, in file-name order.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Human-readable reasons for files that were skipped.
    pub warnings: Vec<String>,
}

/// Where a style file should be renamed to, if anywhere.
fn rename_target(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".css")?;
    if stem == "index" {
        Some(STYLESHEET_ENTRY_POINT.to_string())
    } else if stem.is_empty() || file_name.starts_with('_') {
        None
    } else {
        Some(format!("_{}", file_name))
    }
}

/// Normalizes the style files directly under `styles_dir`.
///
/// A missing directory is not an error and yields an empty outcome.
///
/// # Errors
///
/// Returns an `Err` if the directory exists but cannot be listed. Individual
/// rename failures are reported as warnings.
pub fn normalize_style_partials(styles_dir: &Path) -> Result<StyleOutcome> {
    let mut outcome = StyleOutcome::default();
    if !styles_dir.is_dir() {
        debug!("No styles directory at {}, skipping", styles_dir.display());
        return Ok(outcome);
    }

    let mut entries = fs::read_dir(styles_dir)
        .with_context(|| format!("Failed to list {}", styles_dir.display()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read an entry of {}", styles_dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        // file_type() does not follow symlinks: only regular files are renamed.
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        let Some(target_name) = rename_target(&file_name) else {
            continue;
        };

        let from = entry.path();
        let to = styles_dir.join(&target_name);
        if to.exists() {
            outcome.warnings.push(format!(
                "Not renaming {} to {}: target already exists",
                from.display(),
                target_name
            ));
            continue;
        }
        match fs::rename(&from, &to) {
            Ok(()) => {
                info!("Renamed {} -> {}", file_name, target_name);
                outcome.renamed.push((from, to));
            }
            Err(e) => outcome.warnings.push(format!(
                "Failed to rename {} to {}: {}",
                from.display(),
                target_name,
                e
            )),
        }
    }
    Ok(outcome)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rename_target() {
        assert_eq!(rename_target("index.css").as_deref(), Some("index.scss"));
        assert_eq!(rename_target("reset.css").as_deref(), Some("_reset.css"));
        assert_eq!(rename_target("_reset.css"), None);
        assert_eq!(rename_target("index.scss"), None);
        assert_eq!(rename_target("Index.css").as_deref(), Some("_Index.css"));
        assert_eq!(rename_target("notes.txt"), None);
        assert_eq!(rename_target(".css"), None);
    }

    #[test]
    fn test_normalize_renames_and_promotes() -> Result<()> {
        let dir = tempdir()?;
        let styles = dir.path().join("styles");
        fs::create_dir_all(styles.join("vendor"))?;
        fs::write(styles.join("index.css"), "@import url(\"reset.css\");")?;
        fs::write(styles.join("reset.css"), "* {}")?;
        fs::write(styles.join("layout.css"), "main {}")?;
        fs::write(styles.join("README.md"), "docs")?;

        let outcome = normalize_style_partials(&styles)?;
        assert_eq!(outcome.renamed.len(), 3);
        assert!(outcome.warnings.is_empty());
        assert_eq!(
            names(&styles),
            vec!["README.md", "_layout.css", "_reset.css", "index.scss", "vendor"]
        );
        Ok(())
    }

    #[test]
    fn test_normalize_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let styles = dir.path().join("styles");
        fs::create_dir_all(&styles)?;
        fs::write(styles.join("index.css"), "")?;
        fs::write(styles.join("theme.css"), "")?;

        normalize_style_partials(&styles)?;
        let first = names(&styles);
        let second_pass = normalize_style_partials(&styles)?;

        assert!(second_pass.renamed.is_empty());
        assert!(second_pass.warnings.is_empty());
        assert_eq!(names(&styles), first);
        assert_eq!(first, vec!["_theme.css", "index.scss"]);
        Ok(())
    }

    #[test]
    fn test_collision_is_skipped_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let styles = dir.path().join("styles");
        fs::create_dir_all(&styles)?;
        fs::write(styles.join("theme.css"), "new")?;
        fs::write(styles.join("_theme.css"), "existing")?;

        let outcome = normalize_style_partials(&styles)?;
        assert!(outcome.renamed.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(fs::read_to_string(styles.join("_theme.css"))?, "existing");
        assert!(styles.join("theme.css").exists());
        Ok(())
    }

    #[test]
    fn test_missing_styles_dir_is_noop() -> Result<()> {
        let dir = tempdir()?;
        let outcome = normalize_style_partials(&dir.path().join("styles"))?;
        assert_eq!(outcome, StyleOutcome::default());
        Ok(())
    }
}
