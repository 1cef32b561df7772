//! Coolapk gateway (v1)
//!
//! An authenticated proxy for the Coolapk content API built with Tokio and
//! Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────────┐
//!                    │                 COOLAPK GATEWAY                   │
//!                    │                                                   │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌────────────────┐   │
//!   ─────────────────┼─▶│  http  │──▶│ security │──▶│   handlers     │   │
//!                    │  │ server │   │   auth   │   │ params + call  │   │
//!                    │  └────────┘   └──────────┘   └───────┬────────┘   │
//!                    │                                      │            │
//!                    │                              ┌───────▼────────┐   │
//!                    │                              │   resilience   │   │
//!                    │                              │   Deadline 5s  │   │
//!                    │                              └───────┬────────┘   │
//!                    │                                      │            │
//!   Client Response  │  ┌──────────┐                ┌───────▼────────┐   │
//!   ◀────────────────┼──│ response │◀───────────────│    upstream    │◀──┼── Coolapk API
//!                    │  │passthru  │                │ CoolapkClient  │   │
//!                    │  └──────────┘                └────────────────┘   │
//!                    │                                                   │
//!                    │  config · observability · lifecycle               │
//!                    └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use coolapk_gateway::config::load_config;
use coolapk_gateway::http::HttpServer;
use coolapk_gateway::lifecycle::{signals, Shutdown};
use coolapk_gateway::observability::{logging, metrics};
use coolapk_gateway::upstream::CoolapkClient;

#[derive(Parser)]
#[command(name = "coolapk-gateway")]
#[command(about = "Authenticated proxy for the Coolapk content API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("coolapk-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.auth.is_disabled() {
        tracing::warn!("INTERNAL_AUTH_TOKEN is not set; authorization is disabled");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let client = CoolapkClient::new(&config.upstream)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(client));
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
