//! # Sitekit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utility modules used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`archive`**: gzipped tar creation for backups.
//! - **`docker`**: Docker Engine API access (`bollard`).
//! - **`fs`**: directory creation, file I/O, tolerant removal, recursive copy.
//! - **`process`**: external tool invocation with inherited stdio.
//! - **`system`**: executable lookup on `PATH`.
//! - **`ui`**: console confirmation prompts.
//!
//! ```rust
//! use crate::common::{fs::io, process::ToolCommand, system};
//!
//! system::require_tool("git")?;
//! io::ensure_dir_exists(&cfg.resolve(&cfg.site.source_dir))?;
//! ToolCommand::new("git").args(["status"]).run().await?;
//! ```
//!

/// Gzipped tar archive creation.
pub mod archive;
/// Docker Engine API helpers.
pub mod docker;
/// Filesystem operations (copy, I/O).
pub mod fs;
/// External process execution.
pub mod process;
/// Host inspection (tool lookup).
pub mod system;
/// Console prompts.
pub mod ui;
