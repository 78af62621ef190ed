//! Pull requests resource client.

use std::sync::Arc;

use crate::clients::repos::repo_path;
use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{
    Limit, Page, PullRequest, PullRequestActivity, PullRequestChange, PullRequestState, Task,
};

/// Client for pull request operations.
pub struct PullsClient {
    transport: Arc<HttpTransport>,
}

fn pull_path(project_key: &str, repository_slug: &str, pull_request_id: u64) -> String {
    format!(
        "{}/pull-requests/{pull_request_id}",
        repo_path(project_key, repository_slug)
    )
}

impl PullsClient {
    /// Create a new pulls client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List pull requests targeting a repository.
    ///
    /// # Arguments
    ///
    /// * `state` - Only pull requests in this state; `All` for every state
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        &self,
        project_key: &str,
        repository_slug: &str,
        state: PullRequestState,
        limit: Limit,
    ) -> Result<Page<PullRequest>, Error> {
        self.transport
            .get_page(
                &format!("{}/pull-requests", repo_path(project_key, repository_slug)),
                limit,
                &[("state", state.as_str().to_string())],
            )
            .await
    }

    /// Get a single pull request.
    ///
    /// # Returns
    ///
    /// `None` if the pull request does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any other reason.
    pub async fn get(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
    ) -> Result<Option<PullRequest>, Error> {
        self.transport
            .get_optional(&pull_path(project_key, repository_slug, pull_request_id), &[])
            .await
    }

    /// List the files changed by a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestChange>, Error> {
        self.transport
            .get_page(
                &format!(
                    "{}/changes",
                    pull_path(project_key, repository_slug, pull_request_id)
                ),
                limit,
                &[],
            )
            .await
    }

    /// List the activity stream of a pull request, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestActivity>, Error> {
        self.transport
            .get_page(
                &format!(
                    "{}/activities",
                    pull_path(project_key, repository_slug, pull_request_id)
                ),
                limit,
                &[],
            )
            .await
    }

    /// List the tasks of a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<Task>, Error> {
        self.transport
            .get_page(
                &format!(
                    "{}/tasks",
                    pull_path(project_key, repository_slug, pull_request_id)
                ),
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
    fn test_pull_path() {
        assert_eq!(
            pull_path("PRJ", "my-repo", 42),
            "/projects/PRJ/repos/my-repo/pull-requests/42"
        );
    }
}
