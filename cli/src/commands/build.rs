//! # Production Build (`sitekit build`)
//!
//! File: cli/src/commands/build.rs
//!
//! Bundles and minifies scripts, then builds the site for production. The
//! bundle must exist before the generator runs since the generated pages
//! reference it.
//!
use super::toolchain;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Bundle scripts and build the site for production")]
pub struct BuildArgs {}

pub async fn handle_build(_args: BuildArgs, cfg: &Config) -> Result<()> {
    run_build(cfg).await?;
    println!(
        "✅ Site built into {}",
        cfg.resolve(&cfg.site.output_dir).display()
    );
    Ok(())
}

/// Bundle, then generate. Shared with `deploy`.
pub async fn run_build(cfg: &Config) -> Result<()> {
    toolchain::bundle_build(cfg)?.run().await?;
    toolchain::site_build(cfg)?.run().await
}
