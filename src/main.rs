//! Binary entry point for the dev edge server.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dev_edge_proxy::config::{load_config, EdgeConfig};
use dev_edge_proxy::http::EdgeServer;
use dev_edge_proxy::net::{ensure_certificate, load_tls_config};

/// Local HTTPS development server with an OAuth pass-through proxy.
#[derive(Parser)]
#[command(name = "dev-edge-proxy")]
#[command(about = "Serve a project directory over HTTPS and proxy its OAuth exchange", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the static file document root.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Serve plain HTTP instead of terminating TLS.
    #[arg(long)]
    no_tls: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dev_edge_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    if let Some(port) = cli.port {
        let addr: SocketAddr = config.listener.bind_address.parse()?;
        config.listener.bind_address = SocketAddr::new(addr.ip(), port).to_string();
    }
    if let Some(dir) = cli.dir {
        config.static_files.root = dir;
    }
    if cli.no_tls {
        config.tls.enabled = false;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = %config.static_files.root.display(),
        token_url = %config.upstream.token_url,
        resource_url = %config.upstream.resource_url,
        tls = config.tls.enabled,
        "Configuration loaded"
    );

    let addr: SocketAddr = config.listener.bind_address.parse()?;

    if config.tls.enabled {
        ensure_certificate(&config.tls)?;
        let rustls = load_tls_config(&config.tls).await?;

        tracing::info!(
            port = addr.port(),
            "Serving on https://localhost (self-signed certificate: browsers will warn once)"
        );
        let server = EdgeServer::new(config)?;
        server.run_tls(addr, rustls).await?;
    } else {
        let listener = TcpListener::bind(addr).await?;
        let server = EdgeServer::new(config)?;
        server.run(listener).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
