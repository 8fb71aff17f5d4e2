//! Request classification and store-backed resolution.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, URL)
//!     → classifier.rs (eligibility, bypass, virtual root, asset candidate)
//!     → resolver.rs (key listing, longest-suffix match, payload fetch)
//!     → Return: local hit, entry document, or fall through to the network
//! ```
//!
//! # Design Decisions
//! - Only GET over http(s) is ever resolved locally
//! - Deterministic: longest key first, lexicographic on equal length
//! - No caching of the key set across requests; the installer may write
//!   between requests
//! - Asset-side store failures degrade to a network miss, never a failed
//!   request

pub mod classifier;
pub mod resolver;

pub use classifier::{classify, RequestClass};
pub use resolver::{EntryResolution, Resolution, Resolver};
