//! Application properties client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::ApplicationProperties;

/// Client for instance-level information.
pub struct ApplicationClient {
    transport: Arc<HttpTransport>,
}

impl ApplicationClient {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Retrieve version information and other application properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn properties(&self) -> Result<ApplicationProperties, Error> {
        self.transport.get("/application-properties", &[]).await
    }
}
