//! # Built Site Preview (`sitekit preview`)
//!
//! File: cli/src/commands/preview.rs
//!
//! ## Overview
//!
//! Serves the generated output directory over HTTP so a production build can
//! be checked locally before deploying. Unlike `sitekit dev`, nothing is
//! rebuilt: the files on disk are served as they are.
//!
//! - Host and port come from `[preview]`, overridable with `--host`/`--port`.
//! - If the port is taken, the next free one is used (up to 10 attempts).
//! - Every request is logged through `TraceLayer` (visible with `-v`).
//! - Ctrl+C or SIGTERM shuts the server down gracefully.
//!
//! ## Examples
//!
//! ```bash
//! sitekit build && sitekit preview
//! sitekit preview --port 8080 --host 0.0.0.0
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{Result, SitekitError};
use anyhow::{anyhow, Context};
use axum::Router;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

#[derive(Parser, Debug)]
#[command(about = "Serve the built site locally")]
pub struct PreviewArgs {
    /// Port to listen on (default from `[preview] port`).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Interface to bind (default from `[preview] host`).
    #[arg(long)]
    pub host: Option<String>,
}

pub async fn handle_preview(args: PreviewArgs, cfg: &Config) -> Result<()> {
    let directory = cfg.resolve(&cfg.site.output_dir);
    if !directory.is_dir() {
        return Err(anyhow!(SitekitError::FileSystem(format!(
            "Output directory {} does not exist. Run `sitekit build` first.",
            directory.display()
        ))));
    }

    let host_text = args.host.unwrap_or_else(|| cfg.preview.host.clone());
    let host: IpAddr = host_text.parse().map_err(|_| {
        anyhow!(SitekitError::Config(format!(
            "Invalid preview host '{}': expected an IP address",
            host_text
        )))
    })?;
    let port = args.port.unwrap_or(cfg.preview.port);

    let addr = find_available_port(host, port, MAX_PORT_ATTEMPTS).await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    println!("📂 Serving {}", directory.display());
    println!("🌐 http://{}", addr);
    println!("Press Ctrl+C to stop.");
    info!("Preview server listening on {}", addr);

    axum::serve(listener, create_app(&directory).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Preview server failed")?;

    println!("\nPreview server stopped.");
    Ok(())
}

/// Router serving every path from `directory`; `/dir/` maps to `dir/index.html`.
fn create_app(directory: &Path) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .fallback_service(ServeDir::new(directory))
        .layer(ServiceBuilder::new().layer(trace_layer))
}

/// Tries `start_port`, then the following ports, returning the first free one.
async fn find_available_port(host: IpAddr, start_port: u16, max_attempts: u8) -> Result<SocketAddr> {
    let mut port = start_port;
    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!("Port {} was unavailable, using {}", start_port, port);
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!("Port {} on {} is unavailable ({}), trying next", port, host, e);
                port = match port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }
    anyhow::bail!(
        "Could not find an available port on {} starting from {} after {} attempts.",
        host,
        start_port,
        max_attempts
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down...");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, shutting down...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::fs;
    use std::net::Ipv4Addr;
    use tempfile::tempdir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_find_available_port_skips_occupied() -> Result<()> {
        let host: IpAddr = Ipv4Addr::LOCALHOST.into();
        let occupied = TcpListener::bind(SocketAddr::new(host, 0)).await?;
        let taken = occupied.local_addr()?.port();

        let addr = find_available_port(host, taken, 5).await?;
        assert_ne!(addr.port(), taken);
        assert!(addr.port() > taken && addr.port() <= taken.saturating_add(5));
        Ok(())
    }

    #[tokio::test]
    async fn test_serves_nested_pages_and_index() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("blog"))?;
        fs::write(dir.path().join("index.html"), "<h1>home</h1>")?;
        fs::write(dir.path().join("blog/index.html"), "<h1>blog</h1>")?;

        let response = create_app(dir.path())
            .oneshot(Request::builder().uri("/blog/").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"<h1>blog</h1>");

        let root = create_app(dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty())?)
            .await?;
        assert_eq!(root.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_404() -> Result<()> {
        let dir = tempdir()?;
        let response = create_app(dir.path())
            .oneshot(Request::builder().uri("/nope.html").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_output_dir_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let cfg = Config::with_root(dir.path());
        let args = PreviewArgs {
            port: None,
            host: None,
        };
        let err = handle_preview(args, &cfg).await.unwrap_err();
        assert!(err.to_string().contains("Run `sitekit build` first"));
        Ok(())
    }
}
