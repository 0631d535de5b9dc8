//! # Sitekit Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per subcommand. Each defines a clap argument struct and an async
//! `handle_*` function taking the parsed arguments and the loaded `Config`.
//! `main.rs` maps `Commands` variants onto these handlers.
//!
//! ## Command Groups
//!
//! - Site tasks: `dev`, `build`, `deploy`, `watch`, `preview`, `clean`, `backup`
//! - Containers: `up`, `down`, `bash` (in `compose`), `prune`
//! - Template bootstrap: `start`
//!
//! `toolchain` is not a command: it builds the external tool invocations the
//! site tasks share.
//!

pub mod backup;
pub mod build;
pub mod clean;
pub mod compose;
pub mod deploy;
pub mod dev;
pub mod preview;
pub mod prune;
/// Template bootstrap: clone, rewrite and merge a static template, then self-disable.
pub mod start;
pub mod watch;

mod toolchain;
