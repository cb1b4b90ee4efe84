//! Persisted tile order: a JSON array of tile ids under a versioned key.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::tile::TileId;

/// Key the tile order is stored under. The suffix versions the format.
pub const ORDER_KEY: &str = "tileOrder:v1";

/// Reads and writes the tile order through a key-value store.
///
/// Both directions return errors; deciding to swallow them is the caller's job.
#[derive(Debug)]
pub struct OrderGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> OrderGateway<S> {
    /// Create a gateway using the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, ORDER_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored order.
    ///
    /// `Ok(None)` when nothing (or an empty string) is stored. The value must be
    /// a JSON array; entries that aren't strings are skipped.
    pub fn load(&self) -> StorageResult<Option<Vec<TileId>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let ids = values
            .iter()
            .filter_map(serde_json::Value::as_str)
            .map(TileId::from)
            .collect();
        Ok(Some(ids))
    }

    /// Store the full order.
    pub fn save(&self, ids: &[TileId]) -> StorageResult<()> {
        let json =
            serde_json::to_string(ids).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(&self.key, &json)
    }
}
