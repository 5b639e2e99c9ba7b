//! Admin Gateway
//!
//! Front controller for the admin panel and mobile-app backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                ADMIN GATEWAY                 │
//!                      │                                              │
//!   Client Request     │  ┌──────────┐    ┌──────────────────────┐    │
//!   ───────────────────┼─▶│   http   │───▶│ /api/invoices/*      │    │
//!                      │  │  server  │    │ invoice parser       │    │
//!                      │  └────┬─────┘    └──────────────────────┘    │
//!                      │       │ fallback                             │
//!                      │       ▼                                      │
//!                      │  ┌──────────┐    ┌──────────────────────┐    │
//!                      │  │ routing  │───▶│ controller registry  │    │
//!                      │  │  router  │    │ Controller@action    │    │
//!                      │  └──────────┘    └──────────────────────┘    │
//!                      │                                              │
//!                      │   config · observability · lifecycle         │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use admin_gateway::config::{load_config, GatewayConfig};
use admin_gateway::controllers::{builtin_registry, default_routes};
use admin_gateway::observability::{logging, metrics};
use admin_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "admin-gateway", version, about = "Admin panel and mobile-app backend")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if config.routes.is_empty() {
        config.routes = default_routes();
    }

    logging::init(&config.observability);

    tracing::info!("admin-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(&config, builtin_registry())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
