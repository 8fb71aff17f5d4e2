//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; request ID flows through handlers
//! - Metrics are cheap (atomic increments) and labeled by method, status,
//!   and where the response came from (store, upstream, synthetic)
//! - Every contained error produces a log line; nothing is dropped silently

pub mod logging;
pub mod metrics;
