use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use super::backend::{StorageBackend, StorageError};

/// In-memory storage backend, for tests and ephemeral sessions.
///
/// Backed by a `DashMap` so it can be shared behind an `Arc` without an
/// outer lock.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, String>,
    simulate_write_error: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing any deserialization.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated write error".into()));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
