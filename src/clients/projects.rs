//! Projects resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::{encode_segment, HttpTransport};
use crate::types::{Limit, Page, Project, Repository};

/// Client for project operations.
pub struct ProjectsClient {
    transport: Arc<HttpTransport>,
}

impl ProjectsClient {
    /// Create a new projects client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List projects.
    ///
    /// Only projects for which the authenticated user has the
    /// `PROJECT_VIEW` permission are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, limit: Limit) -> Result<Page<Project>, Error> {
        self.transport.get_page("/projects", limit, &[]).await
    }

    /// Get a project by its key.
    ///
    /// # Returns
    ///
    /// `None` if the project does not exist or is not visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any other reason.
    pub async fn get(&self, project_key: &str) -> Result<Option<Project>, Error> {
        self.transport
            .get_optional(&format!("/projects/{}", encode_segment(project_key)), &[])
            .await
    }

    /// List the repositories of a project.
    ///
    /// The authenticated user must have `REPO_READ` permission for the
    /// project.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the project does not exist.
    pub async fn repositories(
        &self,
        project_key: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        self.transport
            .get_page(
                &format!("/projects/{}/repos", encode_segment(project_key)),
                limit,
                &[],
            )
            .await
    }
}
