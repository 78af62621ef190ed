//! Mock Bitbucket client for testing.
//!
//! Provides a `MockBitbucketClient` that implements [`ProjectClient`]
//! without making HTTP calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{BitbucketError, Error};
use crate::project_client::ProjectClient;
use crate::types::{
    ApplicationProperties, Branch, Limit, Page, Project, PullRequest, PullRequestActivity,
    PullRequestChange, PullRequestState, Repository, Task, User,
};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "get_projects")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return
    pub data: Option<T>,
    /// Error to return instead of data
    pub error: Option<BitbucketError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            call_count: 0,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            call_count: 0,
        }
    }

    /// Create a new mock response failing with the given HTTP status.
    pub fn with_error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "errors": [{ "message": message }] }).to_string();
        Self {
            data: None,
            error: Some(BitbucketError::from_response(status, &body, None)),
            call_count: 0,
        }
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&mut self, default: T) -> Result<T, Error> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(Error::Bitbucket(error.clone()));
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

impl<T: Clone> MockResponse<Option<T>> {
    /// Like `get_result`, but a configured 404 yields `Ok(None)` the way the
    /// real client does for single-object accessors.
    fn get_optional_result(&mut self) -> Result<Option<T>, Error> {
        match self.get_result(None) {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Mock client implementing [`ProjectClient`].
///
/// Every accessor records its call, then returns the configured response,
/// or an empty page / `None` / empty properties if none was configured.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::testing::{MockBitbucketClient, MockResponse};
/// use bitbucket_rest_client::ProjectClient;
///
/// # tokio_test_block_on(async {
/// let mock = MockBitbucketClient::new();
/// mock.configure_get_project_by_key(MockResponse::with_error(404, "no such project"));
///
/// assert!(mock.get_project_by_key("NOPE").await.unwrap().is_none());
/// assert_eq!(mock.call_count("get_project_by_key"), 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Default)]
pub struct MockBitbucketClient {
    calls: Mutex<Vec<MockCall>>,
    projects: Mutex<MockResponse<Page<Project>>>,
    project_by_key: Mutex<MockResponse<Option<Project>>>,
    project_repositories: Mutex<MockResponse<Page<Repository>>>,
    all_repositories: Mutex<MockResponse<Page<Repository>>>,
    repository_by_slug: Mutex<MockResponse<Option<Repository>>>,
    branches: Mutex<MockResponse<Page<Branch>>>,
    forks: Mutex<MockResponse<Page<Repository>>>,
    default_branch: Mutex<MockResponse<Option<Branch>>>,
    pull_requests: Mutex<MockResponse<Page<PullRequest>>>,
    changes: Mutex<MockResponse<Page<PullRequestChange>>>,
    activities: Mutex<MockResponse<Page<PullRequestActivity>>>,
    tasks: Mutex<MockResponse<Page<Task>>>,
    users: Mutex<MockResponse<Page<User>>>,
    application_properties: Mutex<MockResponse<ApplicationProperties>>,
}

impl MockBitbucketClient {
    /// Create a new mock client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an `Arc<dyn ProjectClient>` for code that takes a trait object.
    #[must_use]
    pub fn into_shared(self) -> Arc<dyn ProjectClient> {
        Arc::new(self)
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        lock(&self.calls).push(MockCall::new(method, args));
    }

    pub fn configure_get_projects(&self, response: MockResponse<Page<Project>>) {
        *lock(&self.projects) = response;
    }

    pub fn configure_get_project_by_key(&self, response: MockResponse<Option<Project>>) {
        *lock(&self.project_by_key) = response;
    }

    pub fn configure_get_project_repositories(&self, response: MockResponse<Page<Repository>>) {
        *lock(&self.project_repositories) = response;
    }

    pub fn configure_get_all_repositories(&self, response: MockResponse<Page<Repository>>) {
        *lock(&self.all_repositories) = response;
    }

    pub fn configure_get_repository_by_slug(&self, response: MockResponse<Option<Repository>>) {
        *lock(&self.repository_by_slug) = response;
    }

    pub fn configure_get_repository_branches(&self, response: MockResponse<Page<Branch>>) {
        *lock(&self.branches) = response;
    }

    pub fn configure_get_repository_forks(&self, response: MockResponse<Page<Repository>>) {
        *lock(&self.forks) = response;
    }

    pub fn configure_get_repository_default_branch(&self, response: MockResponse<Option<Branch>>) {
        *lock(&self.default_branch) = response;
    }

    pub fn configure_get_repository_pull_requests(
        &self,
        response: MockResponse<Page<PullRequest>>,
    ) {
        *lock(&self.pull_requests) = response;
    }

    pub fn configure_get_repository_pull_request_changes(
        &self,
        response: MockResponse<Page<PullRequestChange>>,
    ) {
        *lock(&self.changes) = response;
    }

    pub fn configure_get_repository_pull_request_activities(
        &self,
        response: MockResponse<Page<PullRequestActivity>>,
    ) {
        *lock(&self.activities) = response;
    }

    pub fn configure_get_repository_pull_request_tasks(&self, response: MockResponse<Page<Task>>) {
        *lock(&self.tasks) = response;
    }

    pub fn configure_get_users(&self, response: MockResponse<Page<User>>) {
        *lock(&self.users) = response;
    }

    pub fn configure_get_application_properties(
        &self,
        response: MockResponse<ApplicationProperties>,
    ) {
        *lock(&self.application_properties) = response;
    }

    /// Check if a method was called.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        lock(&self.calls).iter().any(|call| call.method == method)
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let calls = lock(&self.calls);
        match method {
            Some(m) => calls.iter().filter(|call| call.method == m).cloned().collect(),
            None => calls.clone(),
        }
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        lock(&self.calls).clear();
    }
}

fn limit_args(limit: Limit) -> [String; 2] {
    [limit.start().to_string(), limit.limit().to_string()]
}

#[async_trait]
impl ProjectClient for MockBitbucketClient {
    async fn get_projects(&self, limit: Limit) -> Result<Page<Project>, Error> {
        self.record_call("get_projects", limit_args(limit).to_vec());
        lock(&self.projects).get_result(Page::empty(limit.start()))
    }

    async fn get_project_by_key(&self, project_key: &str) -> Result<Option<Project>, Error> {
        self.record_call("get_project_by_key", vec![project_key.to_string()]);
        lock(&self.project_by_key).get_optional_result()
    }

    async fn get_project_repositories(
        &self,
        project_key: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_project_repositories",
            vec![project_key.to_string(), start, size],
        );
        lock(&self.project_repositories).get_result(Page::empty(limit.start()))
    }

    async fn get_all_repositories(&self, limit: Limit) -> Result<Page<Repository>, Error> {
        self.record_call("get_all_repositories", limit_args(limit).to_vec());
        lock(&self.all_repositories).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_by_slug(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>, Error> {
        self.record_call(
            "get_repository_by_slug",
            vec![project_key.to_string(), repository_slug.to_string()],
        );
        lock(&self.repository_by_slug).get_optional_result()
    }

    async fn get_repository_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: Option<&str>,
        limit: Limit,
    ) -> Result<Page<Branch>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_branches",
            vec![
                project_key.to_string(),
                repository_slug.to_string(),
                format!("{query:?}"),
                start,
                size,
            ],
        );
        lock(&self.branches).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_forks",
            vec![project_key.to_string(), repository_slug.to_string(), start, size],
        );
        lock(&self.forks).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>, Error> {
        self.record_call(
            "get_repository_default_branch",
            vec![project_key.to_string(), repository_slug.to_string()],
        );
        lock(&self.default_branch).get_optional_result()
    }

    async fn get_repository_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        state: PullRequestState,
        limit: Limit,
    ) -> Result<Page<PullRequest>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_pull_requests",
            vec![
                project_key.to_string(),
                repository_slug.to_string(),
                state.to_string(),
                start,
                size,
            ],
        );
        lock(&self.pull_requests).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestChange>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_pull_request_changes",
            vec![
                project_key.to_string(),
                repository_slug.to_string(),
                pull_request_id.to_string(),
                start,
                size,
            ],
        );
        lock(&self.changes).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestActivity>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_pull_request_activities",
            vec![
                project_key.to_string(),
                repository_slug.to_string(),
                pull_request_id.to_string(),
                start,
                size,
            ],
        );
        lock(&self.activities).get_result(Page::empty(limit.start()))
    }

    async fn get_repository_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<Task>, Error> {
        let [start, size] = limit_args(limit);
        self.record_call(
            "get_repository_pull_request_tasks",
            vec![
                project_key.to_string(),
                repository_slug.to_string(),
                pull_request_id.to_string(),
                start,
                size,
            ],
        );
        lock(&self.tasks).get_result(Page::empty(limit.start()))
    }

    async fn get_users(&self, limit: Limit) -> Result<Page<User>, Error> {
        self.record_call("get_users", limit_args(limit).to_vec());
        lock(&self.users).get_result(Page::empty(limit.start()))
    }

    async fn get_application_properties(&self) -> Result<ApplicationProperties, Error> {
        self.record_call("get_application_properties", vec![]);
        lock(&self.application_properties).get_result(ApplicationProperties::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Links, ProjectType};

    fn project(key: &str) -> Project {
        Project {
            key: key.to_string(),
            id: 1,
            name: format!("{key} project"),
            description: None,
            public: false,
            project_type: ProjectType::Normal,
            owner: None,
            links: Links::default(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_accessors_return_empty_results() {
        let mock = MockBitbucketClient::new();

        let page = mock.get_projects(Limit::new(50, 25)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.start, 50);
        assert!(page.is_last_page);

        assert!(mock.get_project_by_key("PRJ").await.unwrap().is_none());
        assert!(mock.get_application_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_page_is_returned() {
        let mock = MockBitbucketClient::new();
        let mut page = Page::empty(0);
        page.values = vec![project("PRJ"), project("OPS")];
        page.size = 2;
        mock.configure_get_projects(MockResponse::with_data(page));

        let result = mock.get_projects(Limit::default()).await.unwrap();
        let keys: Vec<_> = result.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["PRJ", "OPS"]);
    }

    #[tokio::test]
    async fn test_not_found_on_optional_accessor_is_none() {
        let mock = MockBitbucketClient::new();
        mock.configure_get_repository_by_slug(MockResponse::with_error(
            404,
            "Repository PRJ/missing does not exist.",
        ));

        let repo = mock.get_repository_by_slug("PRJ", "missing").await.unwrap();
        assert!(repo.is_none());
    }

    #[tokio::test]
    async fn test_configured_error_is_returned() {
        let mock = MockBitbucketClient::new();
        mock.configure_get_users(MockResponse::with_error(401, "Authentication failed"));

        let err = mock.get_users(Limit::default()).await.unwrap_err();
        match err {
            Error::Bitbucket(e) => {
                assert!(matches!(e, BitbucketError::Authentication { .. }));
                assert_eq!(e.message(), "Authentication failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let mock = MockBitbucketClient::new();

        mock.get_repository_pull_requests("PRJ", "repo", PullRequestState::Merged, Limit::new(0, 10))
            .await
            .unwrap();
        mock.get_repository_branches("PRJ", "repo", Some("feature"), Limit::default())
            .await
            .unwrap();
        mock.get_repository_branches("PRJ", "repo", None, Limit::default())
            .await
            .unwrap();

        assert_eq!(mock.get_calls(None).len(), 3);
        assert_eq!(mock.call_count("get_repository_branches"), 2);

        let pr_calls = mock.get_calls(Some("get_repository_pull_requests"));
        assert_eq!(pr_calls[0].args, vec!["PRJ", "repo", "MERGED", "0", "10"]);

        mock.reset();
        assert!(!mock.was_called("get_repository_branches"));
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let client = MockBitbucketClient::new().into_shared();
        let props = client.get_application_properties().await.unwrap();
        assert!(props.version().is_none());
    }
}
