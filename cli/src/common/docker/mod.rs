//! # Sitekit Docker Utilities (`common::docker`)
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Docker Engine API access through `bollard`. Compose lifecycle commands
//! (`up`, `down`, `bash`) go through the `docker compose` CLI instead, because
//! the Engine API has no notion of a compose project.
//!
//! - **`connect`**: daemon connection with a friendly error.
//! - **`prune`**: removal of stopped containers, unused networks and dangling images.
//!
pub mod connect;
pub mod prune;
