//! # Sitekit Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every task command is a sequence of external tool invocations (site
//! generator, bundler, rsync, docker compose, git). This module wraps
//! `tokio::process::Command` so those invocations behave uniformly:
//!
//! - The program and its leading arguments come from configuration
//!   (`["bundle", "exec", "jekyll"]`), and the command appends its fixed flags.
//! - Standard input, output and error are inherited so the user sees tool
//!   output live and interactive tools (`docker compose exec ... bash`) work.
//! - A non-zero exit becomes `SitekitError::ExternalCommand`, naming the full
//!   command line and the exit code.
//! - Children are spawned with `kill_on_drop`, so dropping a pending future
//!   (e.g. after Ctrl+C or a sibling failure in `sitekit dev`) stops the child.
//!
//! ## Usage
//!
//! ```rust
//! let generator = ToolCommand::from_config(&cfg.site.command)?
//!     .args(["build", "--destination", "_site"])
//!     .current_dir(&cfg.root);
//! generator.run().await?;
//! ```
//!
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tracing::{error, info};

/// An external command assembled from configuration plus fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    env: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Builds a command from a configured `[program, leading args...]` list.
    pub fn from_config(command: &[String]) -> Result<Self> {
        let (program, leading) = command.split_first().ok_or_else(|| {
            anyhow!(SitekitError::Config(
                "Configured command is empty; expected [program, args...]".to_string()
            ))
        })?;
        Ok(Self::new(program.clone()).args(leading))
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets an environment variable for the child only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Human-readable command line used in logs and error messages.
    pub fn display(&self) -> String {
        let mut line = String::new();
        for (key, value) in &self.env {
            line.push_str(&format!("{}={} ", key, value));
        }
        line.push_str(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn build(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        command.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }

    /// Runs the command to completion and returns its raw exit status.
    ///
    /// Only spawn failures are errors here; callers that need to interpret a
    /// non-zero exit themselves (e.g. `git clone` during the bootstrap) use this.
    pub async fn status(&self) -> Result<ExitStatus> {
        info!("Executing command: {}", self.display());
        self.build().status().await.with_context(|| {
            format!(
                "Failed to execute command '{}'. Is it installed and in PATH?",
                self.program()
            )
        })
    }

    /// Runs the command and fails with `ExternalCommand` on a non-zero exit.
    pub async fn run(&self) -> Result<()> {
        let status = self.status().await?;
        check_status(&self.display(), status)?;
        info!("Command '{}' completed successfully.", self.display());
        Ok(())
    }
}

/// Converts a non-successful exit status into `SitekitError::ExternalCommand`.
pub fn check_status(cmd: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    let exit_code = status.code().map_or("?".to_string(), |c| c.to_string());
    error!("Command '{}' failed with exit code {}", cmd, exit_code);
    Err(anyhow!(SitekitError::ExternalCommand {
        cmd: cmd.to_string(),
        status: exit_code,
    }))
}

/// Runs two commands concurrently and waits for both.
///
/// If either fails, the other is dropped, which kills its child process.
pub async fn run_pair(first: &ToolCommand, second: &ToolCommand) -> Result<()> {
    tokio::try_join!(first.run(), second.run())?;
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_splits_program_and_args() -> Result<()> {
        let configured = vec!["bundle".to_string(), "exec".to_string(), "jekyll".to_string()];
        let cmd = ToolCommand::from_config(&configured)?.args(["build", "--trace"]);
        assert_eq!(cmd.program(), "bundle");
        assert_eq!(cmd.display(), "bundle exec jekyll build --trace");
        Ok(())
    }

    #[test]
    fn test_env_is_shown_in_display() -> Result<()> {
        let cmd = ToolCommand::from_config(&["jekyll".to_string()])?
            .env("JEKYLL_ENV", "production")
            .arg("build");
        assert_eq!(cmd.display(), "JEKYLL_ENV=production jekyll build");
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_env_reaches_child() {
        let cmd = ToolCommand::new("sh")
            .env("SITEKIT_PROBE", "on")
            .args(["-c", "test \"$SITEKIT_PROBE\" = on"]);
        assert!(cmd.run().await.is_ok());
    }

    #[test]
    fn test_from_config_rejects_empty() {
        let err = ToolCommand::from_config(&[]).unwrap_err();
        assert!(err.to_string().contains("Configured command is empty"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let ok = ToolCommand::new("sh").args(["-c", "exit 0"]);
        assert!(ok.run().await.is_ok());

        let failing = ToolCommand::new("sh").args(["-c", "exit 3"]);
        let err = failing.run().await.unwrap_err();
        match err.downcast_ref::<SitekitError>() {
            Some(SitekitError::ExternalCommand { status, .. }) => assert_eq!(status, "3"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cmd = ToolCommand::new("sitekit-no-such-program-xyz");
        let err = cmd.status().await.unwrap_err();
        assert!(err.to_string().contains("Is it installed and in PATH?"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_pair_propagates_failure() {
        let ok = ToolCommand::new("sh").args(["-c", "exit 0"]);
        let failing = ToolCommand::new("sh").args(["-c", "exit 1"]);
        assert!(run_pair(&ok, &ok).await.is_ok());
        assert!(run_pair(&ok, &failing).await.is_err());
    }
}
