//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → routing::classifier (eligibility, bypass, virtual root)
//!     → routing::resolver (store lookup, longest-suffix match)
//!     → response.rs (local responses: asset, entry document, diagnostics)
//!     → proxy.rs (upstream fetch + isolation-header rewrite) on miss
//! ```

pub mod content_type;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
