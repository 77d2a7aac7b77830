use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::backend::StorageBackend;
use crate::error::CoreError;
use crate::stream::Subscription;

/// One serializable value mirrored under a fixed backend key.
///
/// Reads are served from memory. Writes replace the in-memory value and
/// serialize it to the backend before returning. Nothing coordinates with
/// other writers of the same key: the last `write` wins.
pub struct PersistentCollectionStore<T: Send + Sync + 'static> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    value: watch::Sender<Arc<T>>,
}

impl<T> PersistentCollectionStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Load the value stored under `key`, or fall back to `default`.
    ///
    /// Missing, unreadable, or undecodable state is treated as "no prior
    /// state": it is logged and replaced by `default` in memory. The
    /// backend is not touched until the next `write`.
    pub fn load(backend: Arc<dyn StorageBackend>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let initial = match backend.get(&key) {
            Ok(Some(text)) => match serde_json::from_str::<T>(&text) {
                Ok(value) => {
                    debug!(key = %key, "loaded persisted state");
                    value
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "discarding corrupt persisted state");
                    default
                }
            },
            Ok(None) => {
                debug!(key = %key, "no persisted state, using default");
                default
            }
            Err(e) => {
                warn!(key = %key, error = %e, "persisted state unreadable, using default");
                default
            }
        };

        let (value, _) = watch::channel(Arc::new(initial));
        Self {
            backend,
            key,
            value,
        }
    }

    /// The backend key this store is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory snapshot (cheap `Arc` clone).
    pub fn read(&self) -> Arc<T> {
        self.value.borrow().clone()
    }

    /// Replace the value and persist it.
    ///
    /// On a backend failure the in-memory value has already been replaced
    /// and subscribers notified; the error only reports that the backend
    /// copy is stale.
    pub fn write(&self, new_value: T) -> Result<(), CoreError> {
        let text = serde_json::to_string(&new_value).map_err(|e| CoreError::Serialization {
            key: self.key.clone(),
            message: e.to_string(),
        })?;

        // `send_replace` updates unconditionally, even with zero receivers.
        self.value.send_replace(Arc::new(new_value));

        self.backend.set(&self.key, &text).map_err(|e| {
            warn!(key = %self.key, error = %e, "failed to persist state");
            CoreError::from(e)
        })
    }

    /// Subscribe to value changes.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription::new(self.value.subscribe())
    }
}
