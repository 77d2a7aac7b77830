// ── Task repository ──
//
// CRUD and derived views over the persisted task list. Every mutation
// builds the next snapshot, then hands it to the store, which publishes it
// and writes it through to the backend. No-op commands never write.

mod id;

use std::sync::Arc;

use tracing::{debug, info};

pub use id::{Clock, IdAllocator, SystemClock};

use crate::error::CoreError;
use crate::model::{FilterMode, Task, TaskCounts, TaskId};
use crate::store::{PersistentCollectionStore, StorageBackend};
use crate::stream::Subscription;

/// The persisted task collection.
pub struct TaskRepository {
    store: PersistentCollectionStore<Vec<Task>>,
    ids: IdAllocator,
    clock: Arc<dyn Clock>,
}

impl TaskRepository {
    /// Load tasks stored under `key`, starting empty if there are none.
    pub fn open(backend: Arc<dyn StorageBackend>, key: &str) -> Self {
        Self::with_clock(backend, key, Arc::new(SystemClock))
    }

    /// Like [`open`](Self::open), with an explicit time source.
    pub fn with_clock(backend: Arc<dyn StorageBackend>, key: &str, clock: Arc<dyn Clock>) -> Self {
        let store = PersistentCollectionStore::load(backend, key, Vec::new());
        let ids = IdAllocator::seeded_from(&store.read());
        info!(key, tasks = store.read().len(), "task repository opened");
        Self { store, ids, clock }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.store.read()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.store.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.store.read())
    }

    /// Tasks matching `mode`, in collection order. Recomputed on every call.
    pub fn filter_view(&self, mode: FilterMode) -> Vec<Task> {
        self.store
            .read()
            .iter()
            .filter(|t| mode.matches(t))
            .cloned()
            .collect()
    }

    pub fn subscribe(&self) -> Subscription<Vec<Task>> {
        self.store.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a new active task.
    ///
    /// Text is trimmed; if nothing is left the call is ignored and
    /// `Ok(None)` is returned.
    pub fn add(&mut self, text: &str) -> Result<Option<Task>, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring add with empty text");
            return Ok(None);
        }

        let now = self.clock.now();
        let task = Task {
            id: self.ids.allocate(now),
            text: text.to_owned(),
            completed: false,
            created_at: now,
        };

        let mut next = Vec::clone(&self.store.read());
        next.push(task.clone());
        self.store.write(next)?;

        debug!(id = %task.id, "task added");
        Ok(Some(task))
    }

    /// Flip `completed` on the task with `id`. Unknown ids are ignored.
    pub fn toggle(&mut self, id: TaskId) -> Result<Option<Task>, CoreError> {
        let mut next = Vec::clone(&self.store.read());
        let Some(task) = next.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "toggle: no such task");
            return Ok(None);
        };
        *task = task.toggled();
        let updated = task.clone();

        self.store.write(next)?;
        debug!(%id, completed = updated.completed, "task toggled");
        Ok(Some(updated))
    }

    /// Remove the task with `id`, if present.
    pub fn remove(&mut self, id: TaskId) -> Result<Option<Task>, CoreError> {
        let current = self.store.read();
        let Some(pos) = current.iter().position(|t| t.id == id) else {
            debug!(%id, "remove: no such task");
            return Ok(None);
        };

        let mut next = Vec::clone(&current);
        let removed = next.remove(pos);
        self.store.write(next)?;

        debug!(%id, "task removed");
        Ok(Some(removed))
    }
}
