//! # Sitekit CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration test crates in `cli/tests/`.
//!

// Not every test crate uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// Command for the compiled `sitekit` binary.
pub fn sitekit_cmd() -> Command {
    Command::cargo_bin("sitekit").expect("Failed to find sitekit binary for testing")
}

/// `sitekit --project <project>` isolated from the host's user config.
pub fn sitekit_in(project: &Path) -> Command {
    let mut cmd = sitekit_cmd();
    cmd.env("XDG_CONFIG_HOME", project.join(".test-config"))
        .env_remove("RUST_LOG")
        .arg("--project")
        .arg(project);
    cmd
}

/// `sitekit` run from `dir` without `--project`, isolated from the host's
/// user config. The project root is found by searching upward.
pub fn sitekit_from(dir: &Path, config_home: &Path) -> Command {
    let mut cmd = sitekit_cmd();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .current_dir(dir);
    cmd
}

/// Returns true when `git` can be spawned.
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// Runs `git <args>` in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args([
            "-c",
            "user.name=Sitekit Tests",
            "-c",
            "user.email=tests@sitekit.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to spawn git");
    assert!(status.success(), "git {:?} failed", args);
}
