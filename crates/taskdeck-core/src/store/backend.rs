use std::path::PathBuf;

use thiserror::Error;

/// Failure of a storage backend operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Raw key-value storage.
///
/// This trait handles *where* serialized state lives (memory, disk);
/// `PersistentCollectionStore` handles *what* is stored and how corrupt
/// state is recovered. Values are opaque strings.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    /// Must not leave a partially written value observable.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
