//! # Template Sources
//!
//! File: cli/src/commands/start/source.rs
//!
//! ## Overview
//!
//! A `TemplateSource` materializes a template snapshot into a directory. The
//! production source is `GitSource`, which shallow-clones a repository. The
//! bootstrap pipeline only depends on the trait, so tests can supply a source
//! backed by a local fixture directory.
//!
use crate::common::process::{check_status, ToolCommand};
use crate::core::error::Result;
use std::path::Path;

/// Something that can produce a template snapshot.
#[allow(async_fn_in_trait)]
pub trait TemplateSource {
    /// Identifies the source in messages (e.g. the repository URL).
    fn describe(&self) -> String;

    /// External tool that must be on `PATH` before fetching, if any.
    fn required_tool(&self) -> Option<&str>;

    /// Writes the snapshot into `destination`, which must not exist yet.
    async fn fetch(&self, destination: &Path) -> Result<()>;
}

/// Shallow `git clone` of a repository URL or local path.
#[derive(Debug, Clone)]
pub struct GitSource {
    repository: String,
}

impl GitSource {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    fn clone_command(&self, destination: &Path) -> ToolCommand {
        ToolCommand::new("git")
            .args(["clone", "--depth", "1", "--quiet"])
            .arg(self.repository.as_str())
            .arg(destination.as_os_str())
    }
}

impl TemplateSource for GitSource {
    fn describe(&self) -> String {
        self.repository.clone()
    }

    fn required_tool(&self) -> Option<&str> {
        Some("git")
    }

    async fn fetch(&self, destination: &Path) -> Result<()> {
        let command = self.clone_command(destination);
        let status = command.status().await?;
        check_status(&command.display(), status)
    }
}
