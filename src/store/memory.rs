//! Volatile asset store.

use bytes::Bytes;
use dashmap::DashMap;

use crate::store::client::{AssetStore, StoreError};

/// In-memory store backend for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Bytes>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Bytes>,
        I: IntoIterator<Item = (K, V)>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    /// Write one entry. This is the installer's surface, not the gateway's;
    /// the request path never calls it.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.entries.insert(key.into(), value.into());
    }
}

#[async_trait::async_trait]
impl AssetStore for MemoryStore {
    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }
}
