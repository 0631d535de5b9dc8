//! # Sitekit Persisted Run State
//!
//! File: cli/src/core/state.rs
//!
//! ## Overview
//!
//! Holds state that must survive between invocations. Today that is a single
//! flag, `enable_start`, which gates the template bootstrap. The flag starts
//! out enabled (no state file yet) and only ever transitions to disabled,
//! which happens after a successful bootstrap. Re-enabling is a manual edit of
//! the state file.
//!
//! The state lives in a small TOML file (default `.sitekit/state.toml` under
//! the project root):
//!
//! ```toml
//! enable_start = false
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents of the state file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RunState {
    /// Whether `sitekit start` may run.
    pub enable_start: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self { enable_start: true }
    }
}

/// Reads and writes the state file at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the state. A missing file yields the default (enabled) state and
    /// creates nothing on disk.
    pub fn load(&self) -> Result<RunState> {
        if !self.path.exists() {
            debug!("No state file at {}, using defaults", self.path.display());
            return Ok(RunState::default());
        }
        let content = io::read_file_to_string(&self.path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse state file {}", self.path.display()))
    }

    /// Persists the disabled flag, keeping any other state intact.
    pub fn disable_start(&self) -> Result<()> {
        let mut state = self.load()?;
        state.enable_start = false;
        self.save(&state)?;
        info!("Template bootstrap disabled in {}", self.path.display());
        Ok(())
    }

    fn save(&self, state: &RunState) -> Result<()> {
        let content = toml::to_string(state).context("Failed to serialize run state")?;
        io::write_string_to_file(&self.path, &content)
    }
}
