//! Repositories resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::{encode_segment, HttpTransport};
use crate::types::{Branch, Limit, Page, Repository};

/// Client for repository, branch and fork operations.
pub struct ReposClient {
    transport: Arc<HttpTransport>,
}

/// `/projects/{key}/repos/{slug}` with both segments encoded.
pub(crate) fn repo_path(project_key: &str, repository_slug: &str) -> String {
    format!(
        "/projects/{}/repos/{}",
        encode_segment(project_key),
        encode_segment(repository_slug)
    )
}

impl ReposClient {
    /// Create a new repos client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List every repository visible to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_all(&self, limit: Limit) -> Result<Page<Repository>, Error> {
        self.transport.get_page("/repos", limit, &[]).await
    }

    /// Get a repository by project key and slug.
    ///
    /// # Returns
    ///
    /// `None` if the project or repository does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any other reason.
    pub async fn get(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>, Error> {
        self.transport
            .get_optional(&repo_path(project_key, repository_slug), &[])
            .await
    }

    /// List branches of a repository.
    ///
    /// # Arguments
    ///
    /// * `query` - Optional filter; only branches whose name contains it are
    ///   returned. An empty string is the same as no filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: Option<&str>,
        limit: Limit,
    ) -> Result<Page<Branch>, Error> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            params.push(("filterText", q.to_string()));
        }

        self.transport
            .get_page(
                &format!("{}/branches", repo_path(project_key, repository_slug)),
                limit,
                &params,
            )
            .await
    }

    /// Get the default branch of a repository.
    ///
    /// # Returns
    ///
    /// `None` if the repository has no default branch yet (empty repository)
    /// or does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any other reason.
    pub async fn default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>, Error> {
        self.transport
            .get_optional(
                &format!("{}/branches/default", repo_path(project_key, repository_slug)),
                &[],
            )
            .await
    }

    /// List forks of a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        self.transport
            .get_page(
                &format!("{}/forks", repo_path(project_key, repository_slug)),
                limit,
                &[],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_path_encodes_segments() {
        assert_eq!(repo_path("PRJ", "my-repo"), "/projects/PRJ/repos/my-repo");
        assert_eq!(
            repo_path("~jcitizen", "odd name"),
            "/projects/~jcitizen/repos/odd%20name"
        );
    }
}
