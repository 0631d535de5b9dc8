//! # Source Backup (`sitekit backup`)
//!
//! File: cli/src/commands/backup.rs
//!
//! ## Overview
//!
//! Archives the site source directory into a timestamped gzipped tarball:
//!
//! ```text
//! <backup.directory>/<backup.name>-YYYYmmdd-HHMMSS.tar.gz
//! ```
//!
//! Entries inside the archive are rooted at the source directory's name, so
//! extracting a backup recreates e.g. `src/...`. The archive is written
//! in-process; no `tar` binary is needed.
//!
use crate::common::archive::tar;
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::{Result, SitekitError};
use anyhow::anyhow;
use chrono::{DateTime, Local, TimeZone};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Parser, Debug)]
#[command(about = "Archive the site sources into a timestamped .tar.gz")]
pub struct BackupArgs {
    /// Write the archive here instead of `[backup] directory`.
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

pub async fn handle_backup(args: BackupArgs, cfg: &Config) -> Result<()> {
    let directory = args
        .output
        .unwrap_or_else(|| cfg.resolve(&cfg.backup.directory));
    let archive = create_backup(cfg, &directory, Local::now())?;
    println!("✅ Backup written to {}", archive.display());
    Ok(())
}

/// File name of a backup taken at `at`.
fn archive_name<Tz: TimeZone>(name: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}.tar.gz", name, at.format(TIMESTAMP_FORMAT))
}

fn create_backup<Tz: TimeZone>(cfg: &Config, directory: &Path, at: DateTime<Tz>) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let source = cfg.resolve(&cfg.site.source_dir);
    if !source.is_dir() {
        return Err(anyhow!(SitekitError::FileSystem(format!(
            "Source directory {} does not exist; nothing to back up.",
            source.display()
        ))));
    }
    let prefix = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cfg.backup.name.clone());

    io::ensure_dir_exists(directory)?;
    let archive = directory.join(archive_name(&cfg.backup.name, &at));
    info!("Archiving {} into {}", source.display(), archive.display());
    tar::write_dir_archive(&source, &prefix, &archive)?;
    Ok(archive)
}
