//! # Docker Resource Pruning
//!
//! File: cli/src/common/docker/prune.rs
//!
//! ## Overview
//!
//! Removes unused Docker resources through the Engine API, matching what
//! `docker system prune` removes by default: stopped containers, networks not
//! used by any container, and dangling images. Volumes are never touched.
//!
//! Steps run in dependency order (containers first, so the networks and images
//! they held become unused) and each step's result is folded into a
//! `PruneSummary` for reporting.
//!
use super::connect::connect_docker;
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use bollard::container::PruneContainersOptions;
use bollard::image::PruneImagesOptions;
use bollard::network::PruneNetworksOptions;
use tracing::{debug, info, instrument};

/// Counts of removed resources and bytes reclaimed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneSummary {
    pub containers: usize,
    pub networks: usize,
    pub images: usize,
    pub space_reclaimed: u64,
}

impl PruneSummary {
    /// One-line report, e.g. `Removed 2 container(s), 1 network(s), 0 image(s); reclaimed 1.5 MB`.
    pub fn describe(&self) -> String {
        format!(
            "Removed {} container(s), {} network(s), {} image(s); reclaimed {}",
            self.containers,
            self.networks,
            self.images,
            human_readable_size(self.space_reclaimed)
        )
    }
}

/// Prunes stopped containers, unused networks and dangling images.
#[instrument]
pub async fn prune_unused() -> Result<PruneSummary> {
    let docker = connect_docker().await?;
    let mut summary = PruneSummary::default();

    let containers = docker
        .prune_containers(None::<PruneContainersOptions<String>>)
        .await
        .map_err(|e| anyhow!(SitekitError::DockerApi { source: e }))
        .context("Failed to prune stopped containers")?;
    summary.containers = containers.containers_deleted.map_or(0, |d| d.len());
    summary.space_reclaimed += reclaimed(containers.space_reclaimed);
    debug!("Pruned {} container(s)", summary.containers);

    let networks = docker
        .prune_networks(None::<PruneNetworksOptions<String>>)
        .await
        .map_err(|e| anyhow!(SitekitError::DockerApi { source: e }))
        .context("Failed to prune unused networks")?;
    summary.networks = networks.networks_deleted.map_or(0, |d| d.len());
    debug!("Pruned {} network(s)", summary.networks);

    let images = docker
        .prune_images(None::<PruneImagesOptions<String>>)
        .await
        .map_err(|e| anyhow!(SitekitError::DockerApi { source: e }))
        .context("Failed to prune dangling images")?;
    summary.images = images.images_deleted.map_or(0, |d| d.len());
    summary.space_reclaimed += reclaimed(images.space_reclaimed);
    debug!("Pruned {} image(s)", summary.images);

    info!("{}", summary.describe());
    Ok(summary)
}

fn reclaimed(bytes: Option<i64>) -> u64 {
    bytes.map_or(0, |b| u64::try_from(b).unwrap_or(0))
}

/// Formats a byte count with binary units (B, KB, MB, GB).
fn human_readable_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
