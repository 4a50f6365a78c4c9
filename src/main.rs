//! JSON:API negotiation gateway (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request ID ─▶ trace ─▶ timeout ─▶ negotiation guard ──┬──▶ handler
//!                                                          │               │      │
//!                                                          ▼               │      ▼
//!                                                 403 JSON:API error       │  encoder registry
//!                                                                          │  (one encoder per name)
//!     Client Response ◀────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use jsonapi_gateway::config::{self, GatewayConfig};
use jsonapi_gateway::lifecycle::{signals, Shutdown};
use jsonapi_gateway::negotiation::AcceptHeaderPolicy;
use jsonapi_gateway::observability::{logging, metrics};
use jsonapi_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "jsonapi-gateway")]
#[command(about = "JSON:API content negotiation gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the Accept header policy (default, ignore, require).
    #[arg(long)]
    accept_policy: Option<AcceptHeaderPolicy>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(policy) = cli.accept_policy {
        config.negotiation.accept_policy = policy;
    }
    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init_logging(&config.observability);
    tracing::info!("jsonapi-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        media_type = %config.negotiation.media_type,
        accept_policy = %config.negotiation.accept_policy,
        encoders = config.encoding.encoders.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(signals::shutdown_on_ctrl_c(Arc::clone(&shutdown)));

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
