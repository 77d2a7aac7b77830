// ── Task id allocation ──
//
// Ids keep the wall-clock millisecond format persisted collections already
// use, but never repeat: two adds within the same millisecond get
// consecutive values.

use chrono::{DateTime, Utc};

use crate::model::{Task, TaskId};

/// Source of "now" for task creation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Strictly increasing, time-derived task ids.
///
/// `next = max(now_ms, last + 1)`. Seeded from the largest id already in
/// a loaded collection so reloads continue above it.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: Option<u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator that will never hand out an id already used in `tasks`.
    pub fn seeded_from(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|t| t.id.get()).max(),
        }
    }

    /// The most recently issued (or seeded) id.
    pub fn last(&self) -> Option<TaskId> {
        self.last.map(TaskId)
    }

    pub fn allocate(&mut self, now: DateTime<Utc>) -> TaskId {
        // Pre-epoch clocks are treated as 0; monotonicity still holds.
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) => now_ms.max(last.saturating_add(1)),
            None => now_ms,
        };
        self.last = Some(id);
        TaskId(id)
    }
}
