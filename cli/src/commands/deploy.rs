//! # Deployment (`sitekit deploy`)
//!
//! File: cli/src/commands/deploy.rs
//!
//! Builds the site and synchronizes the output directory to the configured
//! `[deploy] target` with rsync. The target is checked before building so a
//! missing setting fails fast.
//!
use super::{build, toolchain};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Build the site and upload it with rsync")]
pub struct DeployArgs {
    /// Upload the existing output without rebuilding first.
    #[arg(long)]
    pub skip_build: bool,
}

pub async fn handle_deploy(args: DeployArgs, cfg: &Config) -> Result<()> {
    let upload = toolchain::rsync(cfg)?;

    if args.skip_build {
        info!("Skipping build as requested");
    } else {
        build::run_build(cfg).await?;
    }

    upload.run().await?;
    println!("✅ Deployed to {}", cfg.deploy.target);
    Ok(())
}
