// ── Remote collection cache ──
//
// One `FetchState` per collection kind, published through a `watch`
// channel. Fetches are never cancelled; `ResponseOrdering` decides whether
// a response from a superseded request may still land.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use taskdeck_api::{RemoteClient, TransportConfig};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{CoreConfig, ResponseOrdering};
use crate::error::CoreError;
use crate::model::{CollectionKind, FetchError, FetchState, RemoteItems};
use crate::stream::Subscription;

/// Fetch state of the `users` and `posts` collections.
pub struct RemoteCollectionCache {
    client: RemoteClient,
    ordering: ResponseOrdering,
    states: [watch::Sender<Arc<FetchState>>; 2],
    /// Latest sequence number issued per kind.
    issued: [AtomicU64; 2],
}

impl RemoteCollectionCache {
    /// Build a cache whose client targets `config.base_url`.
    pub fn new(config: &CoreConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url).map_err(taskdeck_api::Error::from)?;
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = RemoteClient::new(base_url, &transport)?;
        Ok(Self::with_client(client, config.response_ordering))
    }

    pub fn with_client(client: RemoteClient, ordering: ResponseOrdering) -> Self {
        Self {
            client,
            ordering,
            states: [
                watch::channel(Arc::new(FetchState::Idle)).0,
                watch::channel(Arc::new(FetchState::Idle)).0,
            ],
            issued: [AtomicU64::new(0), AtomicU64::new(0)],
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    // ── State access ─────────────────────────────────────────────────

    pub fn state(&self, kind: CollectionKind) -> Arc<FetchState> {
        self.slot(kind).borrow().clone()
    }

    pub fn subscribe(&self, kind: CollectionKind) -> Subscription<FetchState> {
        Subscription::new(self.slot(kind).subscribe())
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch `kind` and wait for the result to be applied.
    ///
    /// The state is `Loading` until the single GET completes, then
    /// `Success` with the full list or `Error` with a readable message.
    pub async fn fetch(&self, kind: CollectionKind) {
        let seq = self.begin(kind);
        let result = self.request(kind).await;
        self.complete(kind, seq, result);
    }

    /// Fetch again after an error. Nothing from the previous attempt is
    /// carried over.
    pub async fn retry(&self, kind: CollectionKind) {
        self.fetch(kind).await;
    }

    /// Mark `kind` as loading now and run the request on a spawned task.
    pub fn spawn_fetch(self: &Arc<Self>, kind: CollectionKind) -> JoinHandle<()> {
        let seq = self.begin(kind);
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let result = cache.request(kind).await;
            cache.complete(kind, seq, result);
        })
    }

    fn slot(&self, kind: CollectionKind) -> &watch::Sender<Arc<FetchState>> {
        &self.states[kind.index()]
    }

    fn begin(&self, kind: CollectionKind) -> u64 {
        let seq = self.issued[kind.index()].fetch_add(1, Ordering::SeqCst) + 1;
        debug!(%kind, seq, "fetch started");
        self.slot(kind).send_replace(Arc::new(FetchState::Loading));
        seq
    }

    async fn request(&self, kind: CollectionKind) -> Result<RemoteItems, taskdeck_api::Error> {
        match kind {
            CollectionKind::Users => self
                .client
                .list_users()
                .await
                .map(|users| RemoteItems::Users(Arc::new(users))),
            CollectionKind::Posts => self
                .client
                .list_posts()
                .await
                .map(|posts| RemoteItems::Posts(Arc::new(posts))),
        }
    }

    fn complete(
        &self,
        kind: CollectionKind,
        seq: u64,
        result: Result<RemoteItems, taskdeck_api::Error>,
    ) {
        if self.ordering == ResponseOrdering::LatestRequestWins {
            let latest = self.issued[kind.index()].load(Ordering::SeqCst);
            if seq != latest {
                debug!(%kind, seq, latest, "discarding stale response");
                return;
            }
        }

        let next = match result {
            Ok(items) => {
                info!(%kind, count = items.len(), "fetch succeeded");
                FetchState::Success { items }
            }
            Err(e) => {
                warn!(%kind, error = %e, "fetch failed");
                FetchState::Error {
                    error: FetchError::from(&e),
                }
            }
        };
        self.slot(kind).send_replace(Arc::new(next));
    }
}
