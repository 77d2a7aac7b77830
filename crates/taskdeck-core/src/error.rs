// ── Core error types ──
//
// Errors a binding layer can actually receive from taskdeck-core. Corrupt
// persisted state and empty task text never show up here: both are
// recovered locally. Fetch failures are not returned either; they land in
// the kind's `FetchState`. The `From<taskdeck_api::Error>` impl covers
// client construction, where only configuration can be at fault.

use thiserror::Error;

use crate::store::StorageError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Persistence ──────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<taskdeck_api::Error> for CoreError {
    fn from(err: taskdeck_api::Error) -> Self {
        match err {
            taskdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid base URL: {e}"),
            },
            taskdeck_api::Error::Client(message) => CoreError::Config { message },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}
