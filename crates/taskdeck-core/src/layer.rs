// ── Data layer facade ──
//
// The single object a binding layer talks to. Owns the task repository,
// the remote cache, and the per-view UI state (filter mode, active kind,
// search term, page). Remote fetches started here run on spawned tasks
// and are awaited, never aborted, on `settle` / `dispose`.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::model::{
    CollectionKind, FetchState, FilterMode, RemoteItems, Task, TaskCounts, TaskId,
};
use crate::remote::RemoteCollectionCache;
use crate::search::{PageSummary, Searchable, ViewState};
use crate::store::StorageBackend;
use crate::stream::Subscription;
use crate::tasks::TaskRepository;

/// Binding surface over tasks and remote collections.
pub struct DataLayer {
    config: CoreConfig,
    tasks: TaskRepository,
    filter: FilterMode,
    remote: Arc<RemoteCollectionCache>,
    active_kind: CollectionKind,
    view: ViewState,
    in_flight: Vec<JoinHandle<()>>,
}

impl DataLayer {
    /// Load persisted tasks from `backend` and prepare the remote cache.
    ///
    /// No request is made yet; call [`set_active_kind`](Self::set_active_kind)
    /// or [`retry`](Self::retry) to start the first fetch.
    pub fn init(config: CoreConfig, backend: Arc<dyn StorageBackend>) -> Result<Self, CoreError> {
        let remote = Arc::new(RemoteCollectionCache::new(&config)?);
        let tasks = TaskRepository::open(backend, &config.tasks_key);
        info!(base_url = %config.base_url, "data layer initialised");
        Ok(Self::from_parts(config, tasks, remote))
    }

    /// Assemble a layer from already-built components.
    pub fn from_parts(
        config: CoreConfig,
        tasks: TaskRepository,
        remote: Arc<RemoteCollectionCache>,
    ) -> Self {
        Self {
            config,
            tasks,
            filter: FilterMode::default(),
            remote,
            active_kind: CollectionKind::default(),
            view: ViewState::default(),
            in_flight: Vec::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn remote(&self) -> &Arc<RemoteCollectionCache> {
        &self.remote
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.tasks.tasks()
    }

    pub fn counts(&self) -> TaskCounts {
        self.tasks.counts()
    }

    pub fn add(&mut self, text: &str) -> Result<Option<Task>, CoreError> {
        self.tasks.add(text)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<Option<Task>, CoreError> {
        self.tasks.toggle(id)
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Option<Task>, CoreError> {
        self.tasks.remove(id)
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Tasks passing the current filter, in collection order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.tasks.filter_view(self.filter)
    }

    pub fn subscribe_tasks(&self) -> Subscription<Vec<Task>> {
        self.tasks.subscribe()
    }

    // ── Remote collections ───────────────────────────────────────────

    pub fn fetch_state(&self, kind: CollectionKind) -> Arc<FetchState> {
        self.remote.state(kind)
    }

    pub fn subscribe_fetch_state(&self, kind: CollectionKind) -> Subscription<FetchState> {
        self.remote.subscribe(kind)
    }

    pub fn active_kind(&self) -> CollectionKind {
        self.active_kind
    }

    /// Switch the displayed collection.
    ///
    /// Always starts a new fetch for `kind`, even if it is already active
    /// or loaded, and clears the search term and page. Must be called
    /// from within a Tokio runtime.
    pub fn set_active_kind(&mut self, kind: CollectionKind) {
        self.active_kind = kind;
        self.view.reset();
        self.spawn_fetch(kind);
    }

    /// Refetch the active collection.
    pub fn retry(&mut self) {
        self.spawn_fetch(self.active_kind);
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_term(term);
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.view.next_page(total);
    }

    pub fn prev_page(&mut self) {
        self.view.prev_page();
    }

    /// The current page of the active collection after searching.
    ///
    /// Empty (of the active kind) unless the last fetch succeeded.
    pub fn visible_items(&self) -> RemoteItems {
        self.current_page().0
    }

    pub fn total_pages(&self) -> usize {
        self.current_page().1.total_pages
    }

    pub fn page_summary(&self) -> PageSummary {
        self.current_page().1
    }

    fn current_page(&self) -> (RemoteItems, PageSummary) {
        let state = self.remote.state(self.active_kind);
        let page_size = self.config.page_size;
        match state.items() {
            Some(RemoteItems::Users(users)) => {
                let (page, summary) = page_of(&self.view, users.as_slice(), page_size);
                (RemoteItems::Users(Arc::new(page)), summary)
            }
            Some(RemoteItems::Posts(posts)) => {
                let (page, summary) = page_of(&self.view, posts.as_slice(), page_size);
                (RemoteItems::Posts(Arc::new(page)), summary)
            }
            None => (
                RemoteItems::empty(self.active_kind),
                PageSummary {
                    page: self.view.page(),
                    ..PageSummary::default()
                },
            ),
        }
    }

    fn spawn_fetch(&mut self, kind: CollectionKind) {
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.push(self.remote.spawn_fetch(kind));
        debug!(%kind, in_flight = self.in_flight.len(), "fetch spawned");
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Wait until every fetch started so far has applied its result.
    pub async fn settle(&mut self) {
        for handle in self.in_flight.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "fetch task did not complete");
            }
        }
    }

    /// Tear down the layer. In-flight fetches are allowed to finish.
    pub async fn dispose(mut self) {
        self.settle().await;
        info!("data layer disposed");
    }
}

fn page_of<T: Searchable + Clone>(
    view: &ViewState,
    items: &[T],
    page_size: NonZeroUsize,
) -> (Vec<T>, PageSummary) {
    let (page, summary) = view.apply(items, page_size);
    (page.into_iter().cloned().collect(), summary)
}
