//! # Sitekit Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error kinds used throughout sitekit. Fatal failures
//! are expressed as `SitekitError` variants and wrapped in `anyhow::Error`, so
//! callers can attach context with `anyhow::Context` while `main` can still
//! downcast to a specific kind (e.g. to treat `OperationCancelled` as a clean exit).
//!
//! ## Architecture
//!
//! - `SitekitError`: a `thiserror` enum covering configuration, filesystem,
//!   external command, Docker and template bootstrap failures.
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! The bootstrap kinds (`FeatureDisabled`, `OperationCancelled`,
//! `MissingDependency`, `FetchFailed`, `MergeFailed`, `Interrupted`) each name
//! the stage that failed so the message printed by `main` is self-explanatory.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! if !path.exists() {
//!     return Err(SitekitError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! // Check for a specific kind after propagation
//! let cancelled = err
//!     .downcast_ref::<SitekitError>()
//!     .is_some_and(|e| matches!(e, SitekitError::OperationCancelled));
//! ```
//!
use thiserror::Error;

/// Custom error type for the sitekit application.
#[derive(Error, Debug)]
pub enum SitekitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },

    #[error("Template bootstrap is disabled. Set `enable_start = true` in {state_file} to run it again.")]
    FeatureDisabled { state_file: String },

    #[error("Template bootstrap cancelled by user.")]
    OperationCancelled,

    #[error("Required tool '{tool}' was not found on PATH.")]
    MissingDependency { tool: String },

    #[error("Fetch stage failed: could not clone '{repository}': {reason}")]
    FetchFailed { repository: String, reason: String },

    #[error("Merge stage failed: could not copy template into '{destination}': {reason}")]
    MergeFailed { destination: String, reason: String },

    #[error("Template bootstrap interrupted; scratch directory removed.")]
    Interrupted,
}

impl SitekitError {
    /// Returns true for outcomes that should exit with status 0 despite
    /// aborting the command.
    pub fn is_clean_exit(&self) -> bool {
        matches!(self, SitekitError::OperationCancelled)
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
