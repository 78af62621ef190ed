//! Users resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::{encode_segment, HttpTransport};
use crate::types::{Limit, Page, User};

/// Client for user operations.
pub struct UsersClient {
    transport: Arc<HttpTransport>,
}

impl UsersClient {
    /// Create a new users client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, limit: Limit) -> Result<Page<User>, Error> {
        self.transport.get_page("/users", limit, &[]).await
    }

    /// Get a user by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a missing user is `Ok(None)`.
    pub async fn get(&self, user_slug: &str) -> Result<Option<User>, Error> {
        self.transport
            .get_optional(&format!("/users/{}", encode_segment(user_slug)), &[])
            .await
    }
}
