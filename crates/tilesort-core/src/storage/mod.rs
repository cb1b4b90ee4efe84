//! Key-value persistence for the tile order.

mod memory;
mod order;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use order::{OrderGateway, ORDER_KEY};

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for string key-value backends.
///
/// Implementations can store values in memory or in the browser's
/// `localStorage`. A missing key is `Ok(None)`, not an error.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Trait for string key-value backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
