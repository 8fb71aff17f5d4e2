//! Offline Origin Gateway
//!
//! An origin gateway for offline-installed application bundles, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                 OFFLINE ORIGIN                    │
//!                      │                                                   │
//!   Client Request     │  ┌─────────┐    ┌────────────┐    ┌───────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│ classifier │───▶│ resolver  │  │
//!                      │  │ server  │    │            │    │ (store)   │  │
//!                      │  └─────────┘    └─────┬──────┘    └─────┬─────┘  │
//!                      │                       │ no local match  │ hit    │
//!                      │                       ▼                 ▼        │
//!   Client Response    │  ┌─────────┐    ┌────────────┐    ┌───────────┐  │
//!   ◀──────────────────┼──│isolation│◀───│  upstream  │    │ response  │  │
//!                      │  │ rewrite │    │   proxy    │    │  builder  │  │
//!                      │  └─────────┘    └────────────┘    └───────────┘  │
//!                      │                                                   │
//!                      │  ┌─────────────────────────────────────────────┐ │
//!                      │  │            Cross-Cutting Concerns            │ │
//!                      │  │  ┌────────┐ ┌─────────┐ ┌─────────────────┐ │ │
//!                      │  │  │ config │ │ control │ │  observability  │ │ │
//!                      │  │  │        │ │ channel │ │                 │ │ │
//!                      │  │  └────────┘ └─────────┘ └─────────────────┘ │ │
//!                      │  │  ┌─────────────────────────────────────────┐│ │
//!                      │  │  │       lifecycle: startup/shutdown       ││ │
//!                      │  │  └─────────────────────────────────────────┘│ │
//!                      │  └─────────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use offline_origin::config::loader::load_config;
use offline_origin::config::GatewayConfig;
use offline_origin::lifecycle::startup;
use offline_origin::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "offline-origin", version, about = "Servable origin for offline-installed app bundles")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the asset store database path.
    #[arg(long)]
    store_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(path) = cli.store_path {
        config.store.path = path;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        version = %config.version,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        "offline-origin starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
