//! # Sitekit System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host inspection helpers. Currently this is executable lookup on `PATH`,
//! which the template bootstrap uses to verify `git` is installed before
//! touching the network or the filesystem.
//!
//! The lookup walks `PATH` entries directly instead of shelling out to
//! `command -v` (a shell builtin, not a spawnable program).
//!
use crate::core::error::{Result, SitekitError};
use anyhow::anyhow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the first executable named `name` found in the given `PATH` value.
pub fn find_executable_in(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    // Names with a separator are paths, not PATH lookups.
    if name.contains(std::path::MAIN_SEPARATOR) {
        let candidate = PathBuf::from(name);
        return is_executable(&candidate).then_some(candidate);
    }

    for dir in std::env::split_paths(path_var) {
        for candidate_name in candidate_names(name) {
            let candidate = dir.join(&candidate_name);
            if is_executable(&candidate) {
                debug!("Resolved '{}' to {}", name, candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

/// Returns the first executable named `name` on the current process `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    find_executable_in(name, &path_var)
}

/// Fails with `MissingDependency` unless `name` resolves on `PATH`.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    find_executable(name).ok_or_else(|| {
        anyhow!(SitekitError::MissingDependency {
            tool: name.to_string()
        })
    })
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string(), format!("{name}.exe"), format!("{name}.cmd")]
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn test_find_executable_in_custom_path() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let bin_a = tempdir()?;
        let bin_b = tempdir()?;
        let tool = bin_b.path().join("fake-git");
        fs::write(&tool, "#!/bin/sh\n")?;
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;

        // Non-executable file with the same name earlier on PATH is skipped.
        fs::write(bin_a.path().join("fake-git"), "")?;

        let path_var = std::env::join_paths([bin_a.path(), bin_b.path()])?;
        assert_eq!(find_executable_in("fake-git", &path_var), Some(tool));
        assert_eq!(find_executable_in("absent-tool", &path_var), None);
        Ok(())
    }

    #[test]
    fn test_require_tool_missing() {
        let err = require_tool("sitekit-definitely-missing-tool").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SitekitError>(),
            Some(SitekitError::MissingDependency { tool }) if tool == "sitekit-definitely-missing-tool"
        ));
    }
}
