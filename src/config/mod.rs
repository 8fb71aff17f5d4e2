//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → injected into the server at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The build identifier lives here, not in a process-wide global

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::MarkerConfig;
pub use schema::ObservabilityConfig;
pub use schema::StoreBackend;
pub use schema::StoreConfig;
pub use schema::UpstreamConfig;
