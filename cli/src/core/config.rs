//! # Sitekit Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for sitekit: loading,
//! merging, validating and resolving the settings that tell each subcommand
//! which external tools to run and where the project's files live.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `sitekit.toml` in the project root.
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/sitekit/config.toml`).
//! 3. Default values defined in the code.
//!
//! Merging works per section: a section present in the project file replaces
//! the user's section as a whole. Missing keys inside a section fall back to
//! their defaults.
//!
//! Every relative path in the configuration is resolved against the project
//! root: the nearest directory, starting from the current one, that holds
//! `sitekit.toml`, a `.sitekit` state directory or a `.git` directory. The
//! current directory is used only when no ancestor has any of them, so
//! running from a subdirectory such as `src/` still finds the same state file.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let source_dir = cfg.resolve(&cfg.site.source_dir);
//! let generator = &cfg.site.command;
//! ```
//!
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the project configuration file searched for in the project root.
pub const PROJECT_CONFIG_FILENAME: &str = "sitekit.toml";

/// Directory holding sitekit's own state (e.g. the bootstrap flag). It marks
/// the project root when there is no `sitekit.toml`.
const PROJECT_STATE_DIR: &str = ".sitekit";

/// Fully merged configuration used by the command handlers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root. Relative paths in every section are resolved against it.
    pub root: PathBuf,
    pub site: SiteConfig,
    pub bundler: BundlerConfig,
    pub deploy: DeployConfig,
    pub backup: BackupConfig,
    pub compose: ComposeConfig,
    pub preview: PreviewConfig,
    pub template: TemplateConfig,
}

/// On-disk shape of a configuration file. Every section is optional so the
/// project file can override only what it needs.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    site: Option<SiteConfig>,
    bundler: Option<BundlerConfig>,
    deploy: Option<DeployConfig>,
    backup: Option<BackupConfig>,
    compose: Option<ComposeConfig>,
    preview: Option<PreviewConfig>,
    template: Option<TemplateConfig>,
}

/// Static-site generator settings (`sitekit dev`, `build`, `clean`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Program and leading arguments used to invoke the generator.
    pub command: Vec<String>,
    /// Source tree fed to the generator; also the template merge destination.
    pub source_dir: String,
    /// Directory the generator writes the built site to.
    pub output_dir: String,
    /// Generator cache directory removed by `sitekit clean`.
    pub cache_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            command: vec!["bundle".into(), "exec".into(), "jekyll".into()],
            source_dir: "src".into(),
            output_dir: "_site".into(),
            cache_dir: ".jekyll-cache".into(),
        }
    }
}

/// JavaScript bundler settings (`sitekit dev`, `build`, `watch`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BundlerConfig {
    pub command: Vec<String>,
    /// Entry script handed to the bundler.
    pub entry: String,
    /// Directory the bundle is written to. Lives inside the source tree so the
    /// generator picks it up.
    pub output_dir: String,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: vec!["npx".into(), "esbuild".into()],
            entry: "src/scripts/app.js".into(),
            output_dir: "src/bundle".into(),
        }
    }
}

/// Remote sync settings (`sitekit deploy`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub command: Vec<String>,
    /// Sync destination, e.g. `user@host:/var/www/site`. Required for deploys.
    pub target: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            command: vec!["rsync".into(), "-avz".into(), "--delete".into()],
            target: String::new(),
        }
    }
}

/// Backup archive settings (`sitekit backup`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BackupConfig {
    /// Directory archives are written to (can use ~).
    pub directory: String,
    /// Archive name prefix.
    pub name: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            directory: "backups".into(),
            name: "site".into(),
        }
    }
}

/// Container toolchain settings (`sitekit up`, `down`, `bash`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    pub command: Vec<String>,
    /// Service `sitekit bash` opens a shell in.
    pub service: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            command: vec!["docker".into(), "compose".into()],
            service: "web".into(),
        }
    }
}

/// Local HTTP preview settings (`sitekit preview`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub host: String,
    pub port: u16,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
        }
    }
}

/// Template bootstrap settings (`sitekit start`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Repository cloned as the template snapshot (URL or local path).
    pub repository: String,
    /// Exact, case-sensitive answer that confirms the bootstrap.
    pub confirm_token: String,
    /// Snapshot-relative paths removed before the merge.
    pub prune: Vec<String>,
    /// Destination-relative paths removed before the merge.
    pub stale_destination: Vec<String>,
    /// Generator placeholder expanded to the site's base path.
    pub path_variable: String,
    /// Generator placeholder expanded to the site version (cache busting).
    pub version_variable: String,
    /// Generator directive defining the path variable.
    pub include_directive: String,
    /// Subdirectory (relative to the path variable) holding the bundler output.
    pub bundle_subdir: String,
    /// Append `?v=<version>` to stylesheet and script references.
    pub versioned_assets: bool,
    /// State file holding the persisted `enable_start` flag.
    pub state_file: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            confirm_token: "yes".into(),
            prune: vec![".git".into(), "build".into(), "LICENSE".into()],
            stale_destination: vec!["favicon.ico".into()],
            path_variable: "{{ path }}".into(),
            version_variable: "{{ site.version }}".into(),
            include_directive: "{% include path.html %}".into(),
            bundle_subdir: "bundle".into(),
            versioned_assets: true,
            state_file: ".sitekit/state.toml".into(),
        }
    }
}

impl Config {
    /// Builds a configuration with every section at its default, rooted at `root`.
    #[cfg(test)]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            site: SiteConfig::default(),
            bundler: BundlerConfig::default(),
            deploy: DeployConfig::default(),
            backup: BackupConfig::default(),
            compose: ComposeConfig::default(),
            preview: PreviewConfig::default(),
            template: TemplateConfig::default(),
        }
    }

    /// Resolves a configured path against the project root. Absolute paths
    /// are returned unchanged.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Loads, merges, expands and validates the configuration.
///
/// `project_override` pins the project root instead of searching upward from
/// the current directory.
pub fn load_config(project_override: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;

    let (root, project_config) = match project_override {
        Some(dir) => {
            let candidate = dir.join(PROJECT_CONFIG_FILENAME);
            let project = if candidate.is_file() {
                info!("Loading project configuration from: {}", candidate.display());
                Some(load_config_from_path(&candidate)?)
            } else {
                debug!("No {} in {}", PROJECT_CONFIG_FILENAME, dir.display());
                None
            };
            (dir.to_path_buf(), project)
        }
        None => {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            match find_project_root(&current_dir) {
                Some(ProjectLocation {
                    root,
                    config_file: Some(path),
                }) => {
                    info!("Loading project configuration from: {}", path.display());
                    (root, Some(load_config_from_path(&path)?))
                }
                Some(ProjectLocation {
                    root,
                    config_file: None,
                }) => {
                    debug!(
                        "No {} found; using project root {}",
                        PROJECT_CONFIG_FILENAME,
                        root.display()
                    );
                    (root, None)
                }
                None => {
                    debug!(
                        "No project root marker found in current directory or ancestors, using {}",
                        current_dir.display()
                    );
                    (current_dir, None)
                }
            }
        }
    };

    let mut merged = merge_configs(root, user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Sitekit", "sitekit") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// A project root and the configuration file found in it, if any.
#[derive(Debug, PartialEq, Eq)]
struct ProjectLocation {
    root: PathBuf,
    config_file: Option<PathBuf>,
}

/// Walks from `start` towards the filesystem root for the nearest directory
/// holding `sitekit.toml`, the `.sitekit` state directory or a `.git`
/// directory. That directory is the project root.
fn find_project_root(start: &Path) -> Option<ProjectLocation> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(ProjectLocation {
                root: path.to_path_buf(),
                config_file: Some(project_config),
            });
        }
        for marker in [PROJECT_STATE_DIR, ".git"] {
            if path.join(marker).is_dir() {
                debug!(
                    "Found {} at {}, stopping project search.",
                    marker,
                    path.display()
                );
                return Some(ProjectLocation {
                    root: path.to_path_buf(),
                    config_file: None,
                });
            }
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(root: PathBuf, user: ConfigFile, project: Option<ConfigFile>) -> Config {
    let project = project.unwrap_or_default();
    Config {
        root,
        site: project.site.or(user.site).unwrap_or_default(),
        bundler: project.bundler.or(user.bundler).unwrap_or_default(),
        deploy: project.deploy.or(user.deploy).unwrap_or_default(),
        backup: project.backup.or(user.backup).unwrap_or_default(),
        compose: project.compose.or(user.compose).unwrap_or_default(),
        preview: project.preview.or(user.preview).unwrap_or_default(),
        template: project.template.or(user.template).unwrap_or_default(),
    }
}

fn expand_config_paths(config: &mut Config) {
    config.backup.directory = shellexpand::tilde(&config.backup.directory).into_owned();
    config.template.repository = shellexpand::tilde(&config.template.repository).into_owned();
    debug!(
        "Expanded backup directory: {}, template repository: {}",
        config.backup.directory, config.template.repository
    );
}

fn validate_config(config: &Config) -> Result<()> {
    let commands = [
        ("site.command", &config.site.command),
        ("bundler.command", &config.bundler.command),
        ("deploy.command", &config.deploy.command),
        ("compose.command", &config.compose.command),
    ];
    for (key, command) in commands {
        if command.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(anyhow!(SitekitError::Config(format!(
                "'{}' must name a program to run.",
                key
            ))));
        }
    }
    if config.template.confirm_token.is_empty() {
        return Err(anyhow!(SitekitError::Config(
            "'template.confirm_token' cannot be empty.".to_string()
        )));
    }
    if config.template.path_variable.is_empty() {
        return Err(anyhow!(SitekitError::Config(
            "'template.path_variable' cannot be empty.".to_string()
        )));
    }
    if config.preview.port == 0 {
        return Err(anyhow!(SitekitError::Config(
            "'preview.port' must be between 1 and 65535.".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
