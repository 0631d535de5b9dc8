//! # Template Bootstrap Pipeline
//!
//! File: cli/src/commands/start/pipeline.rs
//!
//! ## Overview
//!
//! `Bootstrapper` runs the whole `sitekit start` flow against a
//! `TemplateSource`. It is split in two phases so the interactive part never
//! races the interrupt handler:
//!
//! 1. **`preflight`** (synchronous, no side effects): the feature flag must be
//!    enabled, the user must type the confirmation token, and the source's
//!    required tool must be on `PATH`.
//! 2. **`execute`** (async): fetch into a scratch directory → prune → rename
//!    style partials → rewrite the stylesheet entry point → rewrite the HTML
//!    entry point → merge into the source directory → disable the flag. The
//!    scratch directory is removed when `execute` returns or is dropped.
//!
//! Fatal stages map to dedicated `SitekitError` kinds (`FetchFailed`,
//! `MergeFailed`). Problems in the prune, rename and rewrite stages are
//! non-fatal: they are logged as warnings, collected in the `BootstrapReport`,
//! and the pipeline continues.
//!
use super::rules::{self, RewriteOptions, RewriteRule};
use super::scratch::ScratchDir;
use super::source::TemplateSource;
use super::styles::{self, STYLESHEET_ENTRY_POINT};
use crate::common::fs::{copy, io};
use crate::common::{system, ui};
use crate::core::config::Config;
use crate::core::error::{Result, SitekitError};
use crate::core::state::StateStore;
use anyhow::anyhow;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Subdirectory of the scratch directory the snapshot is cloned into.
const SNAPSHOT_DIR: &str = "snapshot";
/// Snapshot-relative directory holding the style partials.
const STYLES_DIR: &str = "styles";
/// Snapshot-relative HTML entry point.
const HTML_ENTRY_POINT: &str = "index.html";

/// Outcome of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Directory the template was merged into.
    pub destination: PathBuf,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<String>,
}

pub struct Bootstrapper {
    destination: PathBuf,
    state: StateStore,
    confirm_token: String,
    prune: Vec<String>,
    stale_destination: Vec<String>,
    stylesheet_rules: Vec<RewriteRule>,
    html_rules: Vec<RewriteRule>,
}

impl Bootstrapper {
    /// Builds a bootstrapper from the merged configuration, compiling the
    /// rewrite rules up front.
    pub fn new(cfg: &Config) -> Result<Self> {
        let template = &cfg.template;
        Ok(Self {
            destination: cfg.resolve(&cfg.site.source_dir),
            state: StateStore::new(cfg.resolve(&template.state_file)),
            confirm_token: template.confirm_token.clone(),
            prune: template.prune.clone(),
            stale_destination: template.stale_destination.clone(),
            stylesheet_rules: rules::stylesheet_rules()?,
            html_rules: rules::html_rules(&RewriteOptions::from_config(template))?,
        })
    }

    /// Checks the flag, asks for confirmation and verifies required tools.
    ///
    /// Touches nothing on disk. Returns `FeatureDisabled`,
    /// `OperationCancelled` or `MissingDependency` on refusal.
    pub fn preflight<S, R, W>(&self, source: &S, input: &mut R, output: &mut W) -> Result<()>
    where
        S: TemplateSource,
        R: BufRead,
        W: Write,
    {
        if !self.state.load()?.enable_start {
            return Err(anyhow!(SitekitError::FeatureDisabled {
                state_file: self.state.path().display().to_string(),
            }));
        }

        let prompt = format!(
            "This fetches the template from {} and merges it into {}, overwriting conflicting files.",
            source.describe(),
            self.destination.display()
        );
        if !ui::confirm_exact(input, output, &prompt, &self.confirm_token)? {
            return Err(anyhow!(SitekitError::OperationCancelled));
        }

        if let Some(tool) = source.required_tool() {
            system::require_tool(tool)?;
        }
        Ok(())
    }

    /// Runs the fetch → merge → self-disable pipeline.
    pub async fn execute<S: TemplateSource>(&self, source: &S) -> Result<BootstrapReport> {
        let scratch = ScratchDir::create()?;
        let snapshot = scratch.path().join(SNAPSHOT_DIR);

        info!("Fetching template from {}", source.describe());
        source.fetch(&snapshot).await.map_err(|e| {
            anyhow!(SitekitError::FetchFailed {
                repository: source.describe(),
                reason: format!("{:#}", e),
            })
        })?;

        let mut warnings = Vec::new();
        self.prune(&snapshot, &mut warnings);
        self.normalize_styles(&snapshot, &mut warnings);
        rewrite_file(
            &snapshot.join(STYLES_DIR).join(STYLESHEET_ENTRY_POINT),
            &self.stylesheet_rules,
            &mut warnings,
        );
        rewrite_file(
            &snapshot.join(HTML_ENTRY_POINT),
            &self.html_rules,
            &mut warnings,
        );

        self.merge(&snapshot)?;
        self.state.disable_start()?;
        scratch.close();

        Ok(BootstrapReport {
            destination: self.destination.clone(),
            warnings,
        })
    }

    fn prune(&self, snapshot: &Path, warnings: &mut Vec<String>) {
        let snapshot_paths = self.prune.iter().map(|p| snapshot.join(p));
        let destination_paths = self.stale_destination.iter().map(|p| self.destination.join(p));
        for path in snapshot_paths.chain(destination_paths) {
            if let Err(e) = io::remove_path_if_exists(&path) {
                record_warning(warnings, format!("Prune: {:#}", e));
            }
        }
    }

    fn normalize_styles(&self, snapshot: &Path, warnings: &mut Vec<String>) {
        match styles::normalize_style_partials(&snapshot.join(STYLES_DIR)) {
            Ok(outcome) => {
                debug!("Renamed {} style file(s)", outcome.renamed.len());
                for warning in outcome.warnings {
                    record_warning(warnings, format!("Styles: {}", warning));
                }
            }
            Err(e) => record_warning(warnings, format!("Styles: {:#}", e)),
        }
    }

    fn merge(&self, snapshot: &Path) -> Result<()> {
        let merge_failed = |e: anyhow::Error| {
            anyhow!(SitekitError::MergeFailed {
                destination: self.destination.display().to_string(),
                reason: format!("{:#}", e),
            })
        };
        io::ensure_dir_exists(&self.destination).map_err(merge_failed)?;
        copy::copy_directory_contents(snapshot, &self.destination).map_err(merge_failed)?;
        info!("Merged template into {}", self.destination.display());
        Ok(())
    }
}

fn record_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

/// Rewrites `path` in place with `rules`. Missing files are skipped; read and
/// write failures become warnings.
fn rewrite_file(path: &Path, rules: &[RewriteRule], warnings: &mut Vec<String>) {
    if !path.is_file() {
        info!("{} not present in template, skipping rewrite", path.display());
        return;
    }
    let result = io::read_file_to_string(path)
        .and_then(|content| io::write_string_to_file(path, &rules::apply_rules(rules, &content)));
    match result {
        Ok(()) => info!("Rewrote {}", path.display()),
        Err(e) => record_warning(warnings, format!("Rewrite: {:#}", e)),
    }
}
