//! Content-rewriting proxy binary.
//!
//! Binds the configured listener and serves the upstream site through the
//! rewrite pipeline. Configuration comes from an optional TOML file; every
//! field has a default so the proxy runs with no arguments at all.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tm_proxy::config::{load_config, ProxyConfig};
use tm_proxy::http::HttpServer;

#[derive(Parser)]
#[command(name = "tm-proxy")]
#[command(about = "Content-rewriting proxy for a fixed upstream origin", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    // Initialize tracing subscriber
    let default_filter = format!(
        "tm_proxy={},tower_http=info",
        config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.upstream.origin,
        asset_root = %config.assets.root.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
