//! # Docker Cleanup (`sitekit prune`)
//!
//! File: cli/src/commands/prune.rs
//!
//! Removes stopped containers, unused networks and dangling images through the
//! Docker Engine API and reports what was reclaimed. Volumes are kept.
//!
use crate::common::docker;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Remove unused Docker resources",
    long_about = "Prunes stopped containers, unused networks and dangling images.\n\
                  Volumes are never removed."
)]
pub struct PruneArgs {}

pub async fn handle_prune(_args: PruneArgs) -> Result<()> {
    info!("Pruning unused Docker resources...");
    let summary = docker::prune::prune_unused()
        .await
        .context("Docker prune failed")?;
    println!("✅ {}", summary.describe());
    Ok(())
}
