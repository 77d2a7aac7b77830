// ── Persistence layer ──
//
// A key-value `StorageBackend` abstraction with in-memory and file
// implementations, and the `PersistentCollectionStore` that keeps one
// serializable value in sync with a single key.

mod backend;
mod file;
mod memory;
mod persistent;

pub use backend::{StorageBackend, StorageError};
pub use file::{FileBackend, validate_key};
pub use memory::MemoryBackend;
pub use persistent::PersistentCollectionStore;
