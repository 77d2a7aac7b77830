//! State layer between `taskdeck-api` and binding consumers (CLI, UIs).
//!
//! This crate owns the non-visual logic of taskdeck:
//!
//! - **[`PersistentCollectionStore`]**: keeps an in-memory value and its
//!   JSON copy in a [`StorageBackend`] consistent. Corrupt or missing state
//!   silently falls back to a supplied default.
//!
//! - **[`TaskRepository`]**: add / toggle / remove over the persisted task
//!   list, plus derived filter views and counts. Ids come from a monotonic
//!   [`IdAllocator`] so rapid adds never collide.
//!
//! - **[`RemoteCollectionCache`]**: one [`FetchState`] per
//!   [`CollectionKind`], driven by explicit fetch / retry calls against the
//!   remote API. Response ordering under concurrent fetches is selectable
//!   via [`ResponseOrdering`].
//!
//! - **[`search`]**: stateless substring search and fixed-window
//!   pagination over any ordered slice, with [`ViewState`] tracking the
//!   current term and page.
//!
//! - **[`DataLayer`]**: the binding surface: an explicit
//!   [`init`](DataLayer::init) / [`dispose`](DataLayer::dispose) lifecycle
//!   with `watch`-based [`Subscription`]s for change notification.

pub mod config;
pub mod error;
pub mod layer;
pub mod model;
pub mod remote;
pub mod search;
pub mod store;
pub mod stream;
pub mod tasks;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CoreConfig, ResponseOrdering};
pub use error::CoreError;
pub use layer::DataLayer;
pub use remote::RemoteCollectionCache;
pub use search::{PageSummary, Searchable, ViewState};
pub use store::{
    FileBackend, MemoryBackend, PersistentCollectionStore, StorageBackend, StorageError,
};
pub use stream::Subscription;
pub use tasks::{Clock, IdAllocator, SystemClock, TaskRepository};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CollectionKind, FetchError, FetchState, FilterMode, RemoteItems, RemotePost, RemoteUser,
    Task, TaskCounts, TaskId,
};
