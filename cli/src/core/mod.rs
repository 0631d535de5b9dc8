//! # Sitekit Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure used by every command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error kinds and the crate-wide `Result` alias
//! - `state`: Persisted run state (the template bootstrap flag)
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{SitekitError, Result}; // For error handling
//! use crate::core::state::StateStore; // For the bootstrap flag
//! ```
//!
pub mod config;
pub mod error;
pub mod state;
