//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Open store → Bind listener → Intercept from the first accept
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - No waiting phase: a freshly started gateway is live immediately
//! - Takeover needs no client reload; routing switches at the socket
//! - In-flight requests drain through axum's graceful path; abandoned ones
//!   need no compensation, handlers hold no exclusive resources

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
