//! Persistent asset store access.
//!
//! # Data Flow
//! ```text
//! External installer (out of scope)
//!     → writes key/value pairs into the store
//!
//! Gateway (this crate)
//!     → client.rs (AssetStore trait: list_keys, get)
//!     → redb.rs (durable single-file backend)
//!     → memory.rs (volatile backend for dev and tests)
//! ```
//!
//! # Design Decisions
//! - The gateway is a pure reader; population and eviction belong to the
//!   installer
//! - The key set is re-read per request; the installer may mutate the store
//!   between requests
//! - Backends serialize their own internal access; no locking here

pub mod client;
pub mod memory;
pub mod redb;

pub use client::{AssetStore, StoreError};
pub use memory::MemoryStore;
pub use self::redb::RedbStore;
