//! # Docker Daemon Connection
//!
//! File: cli/src/common/docker/connect.rs
//!
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::instrument;

/// Connects to the local Docker daemon using platform defaults
/// (`/var/run/docker.sock` on Unix, the named pipe on Windows, or `DOCKER_HOST`).
///
/// # Errors
///
/// Returns `SitekitError::DockerApi` with a hint that the daemon may not be running.
#[instrument]
pub async fn connect_docker() -> Result<Docker> {
    Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(SitekitError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")
}
