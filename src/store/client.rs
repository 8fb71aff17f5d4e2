//! Asset store contract.
//!
//! # Responsibilities
//! - Define the read-only view of the installed bundle
//! - Carry storage failures as values so callers can apply the
//!   containment policy (miss vs. diagnostic response)
//!
//! # Design Decisions
//! - Keys are bare filenames or slash-delimited relative paths
//! - Values are opaque byte payloads; never parsed here
//! - No write surface: installation is an external collaborator

use bytes::Bytes;

/// Failure while talking to the underlying store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store exists but a read failed.
    #[error("storage access failed: {0}")]
    Access(String),

    /// The store itself could not be opened or reached.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Read-only accessor over the installed asset bundle.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// List every key currently present in the store. Order is not
    /// meaningful; callers impose their own.
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Fetch the payload stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;
}
