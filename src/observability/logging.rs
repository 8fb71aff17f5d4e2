//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins when set; the configured level is the fallback
//! - Pretty format; deployments wanting JSON wrap the binary

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the tracing subscriber.
pub fn init(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "offline_origin={default_level},tower_http={default_level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
