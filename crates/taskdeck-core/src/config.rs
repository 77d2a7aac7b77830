// ── Runtime configuration ──
//
// These types describe how the data layer talks to the remote API and
// where tasks are persisted. They never touch disk: the CLI (or any other
// binding layer) builds a `CoreConfig` and hands it in.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Storage key tasks are persisted under.
pub const DEFAULT_TASKS_KEY: &str = "tasks";

/// Items per page in the remote views.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(5);

/// How overlapping fetches for the same kind are resolved.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Every response is applied in arrival order; the last to arrive wins,
    /// even if it belongs to an older request.
    #[default]
    LastResponseWins,
    /// Each fetch takes a per-kind sequence number and only the most
    /// recently issued one may update the state.
    LatestRequestWins,
}

/// Configuration for a single [`DataLayer`](crate::DataLayer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Base URL of the remote collections (e.g. `https://jsonplaceholder.typicode.com`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Storage key for the task collection.
    pub tasks_key: String,
    /// Items per page for the remote views.
    pub page_size: NonZeroUsize,
    /// Resolution policy for concurrent fetches of the same kind.
    pub response_ordering: ResponseOrdering,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: taskdeck_api::DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
            tasks_key: DEFAULT_TASKS_KEY.into(),
            page_size: DEFAULT_PAGE_SIZE,
            response_ordering: ResponseOrdering::default(),
        }
    }
}
