//! # Template Bootstrap Command (`sitekit start`)
//!
//! File: cli/src/commands/start/mod.rs
//!
//! ## Overview
//!
//! One-time initializer that pulls a static HTML/CSS template from a git
//! repository and turns it into site generator sources under the project's
//! source directory. After a successful run the command disables itself via
//! the state file (`.sitekit/state.toml` by default); set `enable_start = true`
//! there to run it again.
//!
//! ## Architecture
//!
//! - `source.rs`: `TemplateSource` trait and the `git clone` implementation
//! - `scratch.rs`: guard owning the temporary snapshot directory
//! - `styles.rs`: style partial renaming
//! - `rules.rs`: ordered regex rewrite rules for the two entry points
//! - `pipeline.rs`: `Bootstrapper`, which sequences all of the above
//!
//! The confirmation prompt is read synchronously before anything else runs.
//! Only the fetch-and-merge phase races against Ctrl+C: on interrupt its
//! future is dropped, which removes the scratch directory and kills a running
//! `git` child.
//!
//! ## Examples
//!
//! ```bash
//! # Bootstrap from the configured [template] repository
//! sitekit start
//!
//! # Use a different repository for this run
//! sitekit start --repository https://github.com/acme/landing-template.git
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use clap::Args;
use tracing::{info, warn};

mod pipeline;
mod rules;
mod scratch;
mod source;
mod styles;

use pipeline::{BootstrapReport, Bootstrapper};
use source::GitSource;

/// Arguments for the `start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Template repository to clone, overriding `[template] repository`.
    #[arg(long, value_name = "URL")]
    pub repository: Option<String>,
}

/// Handles `sitekit start`.
///
/// A declined confirmation prints a notice and returns `Ok(())`.
pub async fn handle_start(args: StartArgs, cfg: &Config) -> Result<()> {
    info!("Handling start command with args: {:?}", args);

    let repository = args
        .repository
        .unwrap_or_else(|| cfg.template.repository.clone());
    if repository.trim().is_empty() {
        return Err(anyhow!(SitekitError::Config(
            "No template repository configured. Set `repository` in the [template] section of sitekit.toml or pass --repository.".to_string()
        )));
    }

    let source = GitSource::new(repository);
    let bootstrapper = Bootstrapper::new(cfg)?;

    let preflight = {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        bootstrapper.preflight(&source, &mut stdin.lock(), &mut stdout.lock())
    };
    if let Err(e) = preflight {
        if e.downcast_ref::<SitekitError>()
            .is_some_and(SitekitError::is_clean_exit)
        {
            println!("{}", e);
            return Ok(());
        }
        return Err(e);
    }

    let report = tokio::select! {
        result = bootstrapper.execute(&source) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            warn!("Interrupted during template bootstrap");
            return Err(anyhow!(SitekitError::Interrupted));
        }
    };

    print_report(&report, cfg);
    Ok(())
}

fn print_report(report: &BootstrapReport, cfg: &Config) {
    println!("✅ Template merged into {}", report.destination.display());
    if !report.warnings.is_empty() {
        println!("⚠️  Completed with {} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("   - {}", warning);
        }
    }
    println!(
        "`sitekit start` is now disabled. Set `enable_start = true` in {} to run it again.",
        cfg.resolve(&cfg.template.state_file).display()
    );
}
