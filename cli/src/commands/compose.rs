//! # Container Helpers (`sitekit up`, `down`, `bash`)
//!
//! File: cli/src/commands/compose.rs
//!
//! ## Overview
//!
//! Thin wrappers around the project's compose file:
//!
//! - `up`: `docker compose up -d`
//! - `down`: `docker compose down`
//! - `bash`: `docker compose exec <service> bash`, attached to the terminal
//!
//! The compose program is configurable (`[compose] command`), so Podman users
//! can set `["podman", "compose"]`.
//!
use super::toolchain;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Start the project's containers in the background")]
pub struct UpArgs {}

#[derive(Parser, Debug)]
#[command(about = "Stop and remove the project's containers")]
pub struct DownArgs {}

#[derive(Parser, Debug)]
#[command(about = "Open an interactive shell in the web container")]
pub struct BashArgs {
    /// Service to attach to instead of `[compose] service`.
    #[arg(long, short)]
    pub service: Option<String>,
}

pub async fn handle_up(_args: UpArgs, cfg: &Config) -> Result<()> {
    toolchain::compose(cfg, ["up", "-d"])?.run().await
}

pub async fn handle_down(_args: DownArgs, cfg: &Config) -> Result<()> {
    toolchain::compose(cfg, ["down"])?.run().await
}

pub async fn handle_bash(args: BashArgs, cfg: &Config) -> Result<()> {
    let service = args.service.unwrap_or_else(|| cfg.compose.service.clone());
    toolchain::compose(cfg, ["exec".to_string(), service, "bash".to_string()])?
        .run()
        .await
}
