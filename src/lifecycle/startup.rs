//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Open the asset store before accepting traffic
//! - Bind the listener and begin interception immediately
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No warm-up gate: the first accepted connection is already intercepted
//! - Listeners start last (traffic only when ready)

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{GatewayConfig, StoreBackend, StoreConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::store::{AssetStore, MemoryStore, RedbStore, StoreError};

/// Fatal startup failure.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Bring the gateway up and serve until shutdown.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    let store = open_store(&config.store)?;

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
    tracing::info!(
        address = %listener.local_addr()?,
        max_connections = config.listener.max_connections,
        "Listener bound"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

/// Open the configured asset store backend.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn AssetStore>, StoreError> {
    match config.backend {
        StoreBackend::Redb => {
            tracing::info!(path = %config.path, "Opening asset store");
            Ok(Arc::new(RedbStore::open(&config.path)?))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory asset store; contents do not survive restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
