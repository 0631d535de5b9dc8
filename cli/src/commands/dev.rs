//! # Development Server (`sitekit dev`)
//!
//! File: cli/src/commands/dev.rs
//!
//! Runs the site generator's live-reloading server and the bundler in watch
//! mode side by side. Both inherit the terminal; if either exits with an
//! error the other is killed and the error is returned.
//!
use super::toolchain;
use crate::common::process;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Serve the site with live reload while rebuilding scripts on change")]
pub struct DevArgs {}

pub async fn handle_dev(_args: DevArgs, cfg: &Config) -> Result<()> {
    let server = toolchain::site_serve(cfg)?;
    let watcher = toolchain::bundle_watch(cfg)?;
    info!("Starting '{}' and '{}'", server.display(), watcher.display());
    println!("Starting development server and script watcher. Press Ctrl+C to stop.");
    process::run_pair(&server, &watcher).await
}
