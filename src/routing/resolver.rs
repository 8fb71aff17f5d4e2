//! Store-backed path resolution.
//!
//! # Responsibilities
//! - Longest-suffix matching of request paths against the store's key set
//! - Entry-document selection for the virtual root
//! - Containment of store failures per the fallback policy
//!
//! # Design Decisions
//! - Keys sorted by descending length so the deepest key wins when one key
//!   is a textual suffix of another (`_framework/dotnet.wasm` over
//!   `dotnet.wasm`); flat filename matching is ambiguous across nesting
//!   depths
//! - Equal lengths tie-break lexicographically, deterministic for any store
//!   iteration order
//! - A matched key with a missing or empty payload is a miss, not an error

use std::sync::Arc;

use bytes::Bytes;

use crate::config::MarkerConfig;
use crate::store::{AssetStore, StoreError};

/// Outcome of resolving an asset candidate against the store.
#[derive(Debug)]
pub enum Resolution {
    /// A stored payload under the matched key.
    Hit { key: String, body: Bytes },

    /// Nothing usable locally; the caller falls through to the network.
    Miss,
}

/// Outcome of resolving the virtual root to an entry document.
#[derive(Debug)]
pub enum EntryResolution {
    /// The selected entry document's payload.
    Document(Bytes),

    /// No entry document in the store.
    Missing,

    /// The store itself failed; surfaced as a fixed diagnostic response.
    StoreFailed(StoreError),
}

/// Resolves request paths against the installed bundle.
pub struct Resolver {
    store: Arc<dyn AssetStore>,
    markers: MarkerConfig,
}

impl Resolver {
    pub fn new(store: Arc<dyn AssetStore>, markers: MarkerConfig) -> Self {
        Self { store, markers }
    }

    /// Resolve an asset candidate path. Store failures and empty payloads
    /// degrade to `Miss` so the request can still be answered from the
    /// network.
    pub async fn resolve_asset(&self, path: &str) -> Resolution {
        let mut keys = match self.store.list_keys().await {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(error = %err, "Key listing failed, treating as miss");
                return Resolution::Miss;
            }
        };
        sort_longest_first(&mut keys);

        let Some(key) = longest_suffix_match(path, &keys) else {
            return Resolution::Miss;
        };

        match self.store.get(key).await {
            Ok(Some(body)) if !body.is_empty() => Resolution::Hit {
                key: key.to_string(),
                body,
            },
            Ok(_) => {
                tracing::debug!(key, "Matched key has no payload, falling through");
                Resolution::Miss
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Payload read failed, treating as miss");
                Resolution::Miss
            }
        }
    }

    /// Resolve the virtual root to the bundle's entry document. Priority:
    /// the well-known entry key, then the legacy entry key, then the first
    /// bare key (no path separator) ending in `.html`.
    pub async fn resolve_entry(&self) -> EntryResolution {
        let mut keys = match self.store.list_keys().await {
            Ok(keys) => keys,
            Err(err) => return EntryResolution::StoreFailed(err),
        };
        // Bare-HTML fallback selection must not depend on store iteration order.
        keys.sort();

        let Some(key) = select_entry_key(&keys, &self.markers) else {
            return EntryResolution::Missing;
        };

        match self.store.get(key).await {
            Ok(Some(body)) => EntryResolution::Document(body),
            Ok(None) => EntryResolution::Missing,
            Err(err) => EntryResolution::StoreFailed(err),
        }
    }
}

/// Sort keys so the most specific (deepest) candidate is tried first.
pub fn sort_longest_first(keys: &mut [String]) {
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
}

/// First key the request path terminates in: the path ends with `/` + key,
/// or equals `/` + key, or equals the key exactly.
pub fn longest_suffix_match<'a>(path: &str, keys: &'a [String]) -> Option<&'a str> {
    keys.iter().map(String::as_str).find(|key| {
        path.strip_suffix(key)
            .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('/'))
    })
}

fn select_entry_key<'a>(keys: &'a [String], markers: &MarkerConfig) -> Option<&'a str> {
    if let Some(key) = keys.iter().find(|k| **k == markers.primary_entry) {
        return Some(key);
    }
    if let Some(key) = keys.iter().find(|k| **k == markers.legacy_entry) {
        return Some(key);
    }
    keys.iter()
        .map(String::as_str)
        .find(|k| !k.contains('/') && k.ends_with(".html"))
}
