//! # Script Watcher (`sitekit watch`)
//!
//! File: cli/src/commands/watch.rs
//!
use super::toolchain;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Rebuild the script bundle whenever sources change")]
pub struct WatchArgs {}

pub async fn handle_watch(_args: WatchArgs, cfg: &Config) -> Result<()> {
    toolchain::bundle_watch(cfg)?.run().await
}
