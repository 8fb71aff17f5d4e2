//! Durable asset store backend.
//!
//! # Responsibilities
//! - Read keys and payloads out of the single-file database the installer
//!   populated
//! - Keep blocking database reads off the async runtime
//!
//! # Design Decisions
//! - One table, string key to byte payload
//! - A missing table is an empty store: a fresh database the installer has
//!   not written yet, not an error
//! - Every read runs under `spawn_blocking`; the handler task suspends, the
//!   runtime stays responsive

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use redb::{Database, ReadableTable, TableDefinition, TableError};

use crate::store::client::{AssetStore, StoreError};

/// Table holding the installed bundle, keyed by asset path.
const ASSETS: TableDefinition<&str, &[u8]> = TableDefinition::new("assets");

/// Asset store backed by a redb database file.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait::async_trait]
impl AssetStore for RedbStore {
    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let txn = db
                .begin_read()
                .map_err(|e| StoreError::Access(e.to_string()))?;
            let table = match txn.open_table(ASSETS) {
                Ok(table) => table,
                Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
                Err(e) => return Err(StoreError::Access(e.to_string())),
            };
            let mut keys = Vec::new();
            for entry in table.iter().map_err(|e| StoreError::Access(e.to_string()))? {
                let (key, _) = entry.map_err(|e| StoreError::Access(e.to_string()))?;
                keys.push(key.value().to_string());
            }
            Ok(keys)
        })
        .await
        .map_err(|e| StoreError::Access(e.to_string()))?
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let db = self.db.clone();
        let key = key.to_owned();
        tokio::task::spawn_blocking(move || {
            let txn = db
                .begin_read()
                .map_err(|e| StoreError::Access(e.to_string()))?;
            let table = match txn.open_table(ASSETS) {
                Ok(table) => table,
                Err(TableError::TableDoesNotExist(_)) => return Ok(None),
                Err(e) => return Err(StoreError::Access(e.to_string())),
            };
            let value = table
                .get(key.as_str())
                .map_err(|e| StoreError::Access(e.to_string()))?;
            Ok(value.map(|guard| Bytes::copy_from_slice(guard.value())))
        })
        .await
        .map_err(|e| StoreError::Access(e.to_string()))?
    }
}
