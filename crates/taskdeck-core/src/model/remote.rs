// ── Remote collection domain types ──

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use taskdeck_api::{RemotePost, RemoteUser};

/// One of the two remote collection domains.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CollectionKind {
    #[default]
    Users,
    Posts,
}

impl CollectionKind {
    pub const ALL: [Self; 2] = [Self::Users, Self::Posts];

    /// Dense index used for per-kind slots.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Users => 0,
            Self::Posts => 1,
        }
    }
}

/// Items of one kind, shared between the cache and its readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum RemoteItems {
    Users(Arc<Vec<RemoteUser>>),
    Posts(Arc<Vec<RemotePost>>),
}

impl RemoteItems {
    /// An empty collection of the given kind.
    pub fn empty(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Users => Self::Users(Arc::new(Vec::new())),
            CollectionKind::Posts => Self::Posts(Arc::new(Vec::new())),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::Users(_) => CollectionKind::Users,
            Self::Posts(_) => CollectionKind::Posts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Users(items) => items.len(),
            Self::Posts(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why a fetch ended in [`FetchState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchError {
    /// Human-readable failure reason. Never empty.
    pub message: String,
    /// HTTP status, when the upstream answered at all.
    pub status: Option<u16>,
    /// Whether a retry has a reasonable chance of succeeding.
    pub transient: bool,
}

impl From<&taskdeck_api::Error> for FetchError {
    fn from(err: &taskdeck_api::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status(),
            transient: err.is_transient(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Fetch lifecycle of one collection kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success { items: RemoteItems },
    Error { error: FetchError },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> Option<&RemoteItems> {
        match self {
            Self::Success { items } => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }
}
