// Remote collection HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, status checking and
// body decoding. Endpoint methods live in `collections.rs` as inherent
// methods so this module stays focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Upstream that serves the canonical `users` and `posts` collections.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Raw HTTP client for the remote read-only collections.
///
/// Every collection lives at `{base_url}/{resource}` and is returned as a
/// bare JSON array: no envelope, no query parameters, no server-side
/// pagination.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and build a client with default transport settings.
    pub fn from_base_url(base_url: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Self::new(url, &TransportConfig::default())
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the URL of a collection endpoint: `{base}/{resource}`.
    ///
    /// Any path on the base URL is kept; a trailing slash is not required.
    pub(crate) fn collection_url(&self, resource: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            resource
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a collection endpoint and decode the JSON array it returns.
    pub(crate) async fn get_collection<T: DeserializeOwned>(
        &self,
        resource: &'static str,
    ) -> Result<Vec<T>, Error> {
        let url = self.collection_url(resource)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
