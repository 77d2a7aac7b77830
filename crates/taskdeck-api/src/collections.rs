// Collection endpoints
//
// The two fixed, unparameterized read-only endpoints. Each call issues
// exactly one GET and returns the full ordered array.

use tracing::debug;

use crate::client::RemoteClient;
use crate::error::Error;
use crate::models::{RemotePost, RemoteUser};

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";

impl RemoteClient {
    /// List every user record.
    ///
    /// `GET {base}/users`
    pub async fn list_users(&self) -> Result<Vec<RemoteUser>, Error> {
        debug!("listing users");
        self.get_collection(USERS).await
    }

    /// List every post record.
    ///
    /// `GET {base}/posts`
    pub async fn list_posts(&self) -> Result<Vec<RemotePost>, Error> {
        debug!("listing posts");
        self.get_collection(POSTS).await
    }
}
