//! The accessor surface shared by the real and the mock client.

use async_trait::async_trait;

use crate::error::Error;
use crate::types::{
    ApplicationProperties, Branch, Limit, Page, Project, PullRequest, PullRequestActivity,
    PullRequestChange, PullRequestState, Repository, Task, User,
};

/// Read access to projects, repositories, pull requests and users.
///
/// Paged accessors return the window selected by `limit`; single-object
/// accessors return `Ok(None)` when the server reports the resource missing.
/// What is visible depends on the authenticated user's permissions.
#[async_trait]
pub trait ProjectClient: Send + Sync {
    /// Projects the user has `PROJECT_VIEW` permission for.
    async fn get_projects(&self, limit: Limit) -> Result<Page<Project>, Error>;

    async fn get_project_by_key(&self, project_key: &str) -> Result<Option<Project>, Error>;

    /// Repositories of a project; requires `REPO_READ` on the project.
    async fn get_project_repositories(
        &self,
        project_key: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error>;

    async fn get_all_repositories(&self, limit: Limit) -> Result<Page<Repository>, Error>;

    async fn get_repository_by_slug(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>, Error>;

    /// Branches, filtered by name when `query` is given.
    async fn get_repository_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: Option<&str>,
        limit: Limit,
    ) -> Result<Page<Branch>, Error>;

    async fn get_repository_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error>;

    async fn get_repository_default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>, Error>;

    async fn get_repository_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        state: PullRequestState,
        limit: Limit,
    ) -> Result<Page<PullRequest>, Error>;

    async fn get_repository_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestChange>, Error>;

    async fn get_repository_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestActivity>, Error>;

    async fn get_repository_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<Task>, Error>;

    async fn get_users(&self, limit: Limit) -> Result<Page<User>, Error>;

    /// Version information and other application properties.
    async fn get_application_properties(&self) -> Result<ApplicationProperties, Error>;
}
