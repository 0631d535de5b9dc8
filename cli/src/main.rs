//! # Sitekit Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `sitekit` task runner for static sites. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on the `-v` count (`RUST_LOG` overrides it)
//! - Loading the merged user and project configuration once
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Live-reloading development server
//! sitekit dev
//!
//! # Production build and upload, with info-level logs
//! sitekit -v deploy
//!
//! # Run against a project other than the current directory
//! sitekit --project ~/sites/blog backup
//! ```
//!
//! Exit status is 0 on success or when the user declines a confirmation
//! prompt, and 1 on any failure.
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers
mod common; // Shared utilities (process, fs, docker, archive, ...)
mod core; // Config, errors, persistent state

use crate::core::error::SitekitError;

#[derive(Parser, Debug)]
#[command(
    name = "sitekit",
    about = "Task runner for static sites",
    long_about = "Develop, build, deploy and back up a static site, manage its containers,\n\
                  and bootstrap its sources from an HTML/CSS template.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root, instead of searching upward for sitekit.toml.
    #[arg(long, value_name = "DIR", global = true)]
    project: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    Dev(commands::dev::DevArgs),
    #[command(alias = "b")]
    Build(commands::build::BuildArgs),
    Deploy(commands::deploy::DeployArgs),
    Backup(commands::backup::BackupArgs),
    Preview(commands::preview::PreviewArgs),
    Watch(commands::watch::WatchArgs),
    Clean(commands::clean::CleanArgs),
    Up(commands::compose::UpArgs),
    Down(commands::compose::DownArgs),
    Bash(commands::compose::BashArgs),
    Prune(commands::prune::PruneArgs),
    /// Bootstrap the site sources from a template repository (one-time).
    Start(commands::start::StartArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = run(cli).await;

    if let Err(e) = command_result {
        if e.downcast_ref::<SitekitError>()
            .is_some_and(SitekitError::is_clean_exit)
        {
            println!("{}", e);
            return Ok(());
        }
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = core::config::load_config(cli.project.as_deref())?;

    match cli.command {
        Commands::Dev(args) => commands::dev::handle_dev(args, &cfg).await,
        Commands::Build(args) => commands::build::handle_build(args, &cfg).await,
        Commands::Deploy(args) => commands::deploy::handle_deploy(args, &cfg).await,
        Commands::Backup(args) => commands::backup::handle_backup(args, &cfg).await,
        Commands::Preview(args) => commands::preview::handle_preview(args, &cfg).await,
        Commands::Watch(args) => commands::watch::handle_watch(args, &cfg).await,
        Commands::Clean(args) => commands::clean::handle_clean(args, &cfg).await,
        Commands::Up(args) => commands::compose::handle_up(args, &cfg).await,
        Commands::Down(args) => commands::compose::handle_down(args, &cfg).await,
        Commands::Bash(args) => commands::compose::handle_bash(args, &cfg).await,
        Commands::Prune(args) => commands::prune::handle_prune(args).await,
        Commands::Start(args) => commands::start::handle_start(args, &cfg).await,
    }
}
