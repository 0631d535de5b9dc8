//! # Task Tool Invocations
//!
//! File: cli/src/commands/toolchain.rs
//!
//! ## Overview
//!
//! Builds the external commands behind the task subcommands from the merged
//! configuration. Each builder is pure (nothing runs until `.run()` is called),
//! so the exact command lines are unit tested here without the tools being
//! installed.
//!
//! All commands run in the project root and receive absolute paths.
//!
use crate::common::process::ToolCommand;
use crate::core::config::Config;
use crate::core::error::{Result, SitekitError};
use anyhow::anyhow;

/// Environment variable the site generator reads to select production output.
const SITE_ENV_VAR: &str = "JEKYLL_ENV";

fn site(cfg: &Config, subcommand: &str) -> Result<ToolCommand> {
    Ok(ToolCommand::from_config(&cfg.site.command)?
        .arg(subcommand)
        .arg("--source")
        .arg(cfg.resolve(&cfg.site.source_dir))
        .arg("--destination")
        .arg(cfg.resolve(&cfg.site.output_dir))
        .current_dir(&cfg.root))
}

/// `<site> build` with production settings.
pub fn site_build(cfg: &Config) -> Result<ToolCommand> {
    Ok(site(cfg, "build")?.env(SITE_ENV_VAR, "production"))
}

/// `<site> serve --livereload`.
pub fn site_serve(cfg: &Config) -> Result<ToolCommand> {
    Ok(site(cfg, "serve")?.arg("--livereload"))
}

fn bundler(cfg: &Config) -> Result<ToolCommand> {
    let outdir = cfg.resolve(&cfg.bundler.output_dir);
    Ok(ToolCommand::from_config(&cfg.bundler.command)?
        .arg(cfg.resolve(&cfg.bundler.entry))
        .arg("--bundle")
        .arg(format!("--outdir={}", outdir.display()))
        .current_dir(&cfg.root))
}

/// One-shot minified bundle.
pub fn bundle_build(cfg: &Config) -> Result<ToolCommand> {
    Ok(bundler(cfg)?.arg("--minify"))
}

/// Bundler in watch mode, rebuilding on change.
pub fn bundle_watch(cfg: &Config) -> Result<ToolCommand> {
    Ok(bundler(cfg)?.args(["--sourcemap", "--watch"]))
}

/// `rsync <flags> <output_dir>/ <target>`.
///
/// # Errors
///
/// `SitekitError::Config` when no deploy target is configured.
pub fn rsync(cfg: &Config) -> Result<ToolCommand> {
    let target = cfg.deploy.target.trim();
    if target.is_empty() {
        return Err(anyhow!(SitekitError::Config(
            "No deploy target configured. Set `target` in the [deploy] section of sitekit.toml (e.g. \"user@host:/var/www/site\").".to_string()
        )));
    }
    // Trailing slash: sync the directory's contents, not the directory itself.
    let source = format!("{}/", cfg.resolve(&cfg.site.output_dir).display());
    Ok(ToolCommand::from_config(&cfg.deploy.command)?
        .arg(source)
        .arg(target)
        .current_dir(&cfg.root))
}

/// `docker compose <args...>` in the project root.
pub fn compose<I, S>(cfg: &Config, args: I) -> Result<ToolCommand>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    Ok(ToolCommand::from_config(&cfg.compose.command)?
        .args(args)
        .current_dir(&cfg.root))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::with_root("/work/site")
    }

    #[test]
    fn test_site_build_is_production() -> Result<()> {
        assert_eq!(
            site_build(&cfg())?.display(),
            "JEKYLL_ENV=production bundle exec jekyll build --source /work/site/src --destination /work/site/_site"
        );
        Ok(())
    }

    #[test]
    fn test_site_serve_livereload() -> Result<()> {
        let line = site_serve(&cfg())?.display();
        assert!(line.starts_with("bundle exec jekyll serve "));
        assert!(line.ends_with(" --livereload"));
        Ok(())
    }

    #[test]
    fn test_bundler_modes() -> Result<()> {
        assert_eq!(
            bundle_build(&cfg())?.display(),
            "npx esbuild /work/site/src/scripts/app.js --bundle --outdir=/work/site/src/bundle --minify"
        );
        assert!(bundle_watch(&cfg())?.display().ends_with(" --watch"));
        Ok(())
    }

    #[test]
    fn test_rsync_requires_target() -> Result<()> {
        let mut cfg = cfg();
        let err = rsync(&cfg).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SitekitError>(),
            Some(SitekitError::Config(_))
        ));

        cfg.deploy.target = "deploy@example.com:/var/www/site".to_string();
        assert_eq!(
            rsync(&cfg)?.display(),
            "rsync -avz --delete /work/site/_site/ deploy@example.com:/var/www/site"
        );
        Ok(())
    }

    #[test]
    fn test_compose_uses_configured_command() -> Result<()> {
        let mut cfg = cfg();
        cfg.compose.command = vec!["podman-compose".to_string()];
        assert_eq!(compose(&cfg, ["up", "-d"])?.display(), "podman-compose up -d");
        Ok(())
    }
}
