// ── Domain model ──
//
// Canonical types shared by the repository, the remote cache, and the
// binding layer.

pub mod remote;
pub mod task;

pub use remote::{CollectionKind, FetchError, FetchState, RemoteItems};
pub use task::{FilterMode, Task, TaskCounts, TaskId};
pub use taskdeck_api::{Address, Company, RemotePost, RemoteUser};
