//! # Sitekit Tar Archive Creation
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! Writes a gzipped TAR archive (`.tar.gz`) of a directory to a file. Entries
//! are stored under a single top-level directory name, so extracting a backup
//! recreates e.g. `src/...` rather than scattering files into the cwd.
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Archives `source_dir` into `archive_path`, storing entries under `prefix/`.
///
/// The parent directory of `archive_path` is created when missing.
///
/// ## Errors
///
/// Returns an `Err` if the source cannot be read, the archive file cannot be
/// created, or finishing the tar or gzip stream fails.
pub fn write_dir_archive(source_dir: &Path, prefix: &str, archive_path: &Path) -> Result<()> {
    if let Some(parent) = archive_path.parent() {
        io::ensure_dir_exists(parent)?;
    }
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive {}", archive_path.display()))?;

    if let Err(e) = append_and_finish(file, source_dir, prefix) {
        if let Err(remove_err) = std::fs::remove_file(archive_path) {
            warn!(
                "Failed to remove incomplete archive {}: {}",
                archive_path.display(),
                remove_err
            );
        }
        return Err(e);
    }
    Ok(())
}

fn append_and_finish(file: File, source_dir: &Path, prefix: &str) -> Result<()> {
    let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut tar_builder = tar::Builder::new(enc);

    tar_builder
        .append_dir_all(prefix, source_dir)
        .with_context(|| {
            format!(
                "Failed to add directory '{}' contents to the tar archive",
                source_dir.display()
            )
        })?;

    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    encoder
        .finish()
        .context("Failed to finish gzip compression stream")?;
    Ok(())
}
