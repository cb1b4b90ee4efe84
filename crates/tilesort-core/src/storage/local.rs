//! Browser `localStorage` implementation for WebAssembly.

use super::{KeyValueStore, StorageError, StorageResult};

/// `window.localStorage` backed storage.
///
/// The handle is looked up on every call: access can be denied (private
/// browsing, disabled cookies) and that must surface as an error, not a panic.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create a new local storage handle.
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("Get error: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("Set error: {:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("Remove error: {:?}", e)))
    }
}
