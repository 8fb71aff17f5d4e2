//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Upstream origin used for the network fallback path.
    pub upstream: UpstreamConfig,

    /// Asset store backend and location.
    pub store: StoreConfig,

    /// Well-known path markers driving request classification.
    pub markers: MarkerConfig,

    /// Caching directives for locally served assets.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Control channel settings.
    pub control: ControlConfig,

    /// Build identifier reported on the version channel.
    pub version: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            store: StoreConfig::default(),
            markers: MarkerConfig::default(),
            cache: CacheConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            control: ControlConfig::default(),
            version: default_version(),
        }
    }
}

fn default_version() -> String {
    concat!("v", env!("CARGO_PKG_VERSION")).to_string()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Upstream origin for requests the store cannot answer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin URL (scheme + authority) the fallback proxy forwards to.
    pub origin: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Asset store backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Durable single-file database. The default.
    Redb,
    /// Volatile map, for development and tests.
    Memory,
}

/// Asset store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend holds the installed bundle.
    pub backend: StoreBackend,

    /// Database path for the durable backend.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redb,
            path: "assets.redb".to_string(),
        }
    }
}

/// Well-known path markers.
///
/// The bootstrap artifact and the virtual root are matched against the final
/// segment of the decoded request path; the entry keys are matched against
/// store keys.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// The gateway's own bootstrap artifact; requests for it bypass
    /// interception entirely so it can never be served from the store.
    pub bootstrap: String,

    /// Synthetic path segment the host page requests to obtain the bundle's
    /// entry document.
    pub virtual_root: String,

    /// Well-known entry document key, tried first.
    pub primary_entry: String,

    /// Legacy entry document key, tried second.
    pub legacy_entry: String,

    /// Host page name served by the real origin, never from the store.
    pub host_page: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            bootstrap: "sw.js".to_string(),
            virtual_root: "virtual-app.html".to_string(),
            primary_entry: "app.html".to_string(),
            legacy_entry: "index.html".to_string(),
            host_page: "index.html".to_string(),
        }
    }
}

/// Caching directives for locally served assets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Max-age applied to stored assets. The entry document is always served
    /// with a no-store directive regardless of this value.
    pub asset_max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            asset_max_age_secs: 3600,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Idle upstream connection timeout in seconds.
    pub idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            idle_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Control channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Path the host page posts control messages to.
    pub path: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            path: "/__gateway/control".to_string(),
        }
    }
}
