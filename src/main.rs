use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shop_voice_relay::{AppState, RelayConfig, create_router};

/// Relay for the voice shopping assistant
#[derive(Parser, Debug)]
#[command(name = "shop-voice-relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the products JSON file (overrides CATALOG_PATH)
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut RelayConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(catalog) = self.catalog {
            config.catalog_path = catalog;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before the config is read
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = RelayConfig::from_env().context("failed to load configuration")?;
    cli.apply(&mut config);
    info!(?config, "configuration loaded");

    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{address}': {e}"))?;

    let state = AppState::new(config).context("failed to build application state")?;
    let app = create_router(state);

    let listener = TcpListener::bind(socket_addr).await?;
    info!("Server listening on http://{socket_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
