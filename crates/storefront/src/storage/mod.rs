//! Persisted key-value storage.
//!
//! The stores never talk to a disk or a browser directly; they go through the
//! [`KeyValueStore`] port so tests can swap in [`MemoryStore`] while the binary
//! uses [`FileStore`].
//!
//! # Keys
//!
//! - `cart` - JSON array of cart lines
//! - `user` - JSON user record
//!
//! Writes overwrite the whole value. There is no cross-process locking: two
//! processes sharing one store race and the last writer wins.

mod file;
mod memory;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the stores.
pub mod keys {
    /// Key holding the serialized cart lines.
    pub const CART: &str = "cart";

    /// Key holding the serialized current user.
    pub const USER: &str = "user";
}

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be decoded.
    #[error("corrupt value under key {key:?}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A lock guarding in-memory data was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage.
///
/// Mirrors the browser's local storage: values are opaque strings and every
/// call completes before returning.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A storage handle shared between the stores of one shopper.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Open the backend for `data_dir`: files on disk when a directory is
/// given, otherwise process memory.
///
/// # Errors
///
/// Returns `StorageError::Io` if the directory cannot be created.
pub fn open_shared(data_dir: Option<&Path>) -> Result<SharedStorage, StorageError> {
    let storage: SharedStorage = match data_dir {
        Some(dir) => Arc::new(FileStore::open(dir)?),
        None => Arc::new(MemoryStore::new()),
    };
    Ok(storage)
}

/// Read and decode the JSON value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the value is present but does not
/// decode as `T`, or any backend error.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if serialization fails, or any backend
/// error.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key_is_none() {
        let storage = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&storage, "cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStore::new();
        save_json(&storage, "numbers", &[1, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = load_json(&storage, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_load_corrupt_value() {
        let storage = MemoryStore::new();
        storage.set("cart", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json(&storage, "cart");
        assert!(matches!(result, Err(StorageError::Corrupt { key, .. }) if key == "cart"));
    }

    #[test]
    fn test_open_shared_picks_backend() {
        let memory = open_shared(None).unwrap();
        memory.set(keys::CART, "[]").unwrap();
        assert_eq!(memory.get(keys::CART).unwrap().as_deref(), Some("[]"));

        let dir = tempfile::tempdir().unwrap();
        let files = open_shared(Some(dir.path())).unwrap();
        files.set(keys::USER, "{}").unwrap();
        assert!(dir.path().join("user.json").exists());
    }
}
