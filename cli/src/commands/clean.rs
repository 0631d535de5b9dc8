//! # Clean Build Artifacts (`sitekit clean`)
//!
//! File: cli/src/commands/clean.rs
//!
//! Removes the generated site, the script bundle and the generator cache.
//! Paths that do not exist are skipped.
//!
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Remove generated output, the script bundle and caches")]
pub struct CleanArgs {}

pub async fn handle_clean(_args: CleanArgs, cfg: &Config) -> Result<()> {
    let removed = clean_paths(cfg)?;
    if removed.is_empty() {
        println!("Nothing to clean.");
    }
    for path in removed {
        println!("Removed {}", path.display());
    }
    Ok(())
}

/// Deletes the build artifacts and returns the paths that were present.
fn clean_paths(cfg: &Config) -> Result<Vec<PathBuf>> {
    let targets = [
        &cfg.site.output_dir,
        &cfg.bundler.output_dir,
        &cfg.site.cache_dir,
    ];
    let mut removed = Vec::new();
    for target in targets {
        let path = cfg.resolve(target);
        if io::remove_path_if_exists(&path)? {
            removed.push(path);
        } else {
            info!("{} does not exist, skipping", path.display());
        }
    }
    Ok(removed)
}
