// taskdeck-api: Async client for the remote read-only collections (users, posts)

pub mod client;
pub mod collections;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, RemoteClient};
pub use error::Error;
pub use models::{Address, Company, RemotePost, RemoteUser};
pub use transport::TransportConfig;
