//! Bitbucket REST client.
//!
//! Provides the primary interface for talking to a Bitbucket Server or
//! Data Center instance.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::{ApplicationClient, ProjectsClient, PullsClient, ReposClient, UsersClient};
use crate::error::Error;
use crate::project_client::ProjectClient;
use crate::transport::{Credentials, HttpTransport, RetryConfig};
use crate::types::{
    ApplicationProperties, Branch, Limit, Page, Project, PullRequest, PullRequestActivity,
    PullRequestChange, PullRequestState, Repository, Task, User,
};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main client for the Bitbucket REST API.
///
/// Aggregates all resource clients over one shared transport.
///
/// # Example
///
/// ```rust,ignore
/// use bitbucket_rest_client::{BitbucketClient, Credentials, Limit, PullRequestState};
///
/// let client = BitbucketClient::new(
///     "https://bitbucket.example.com",
///     Credentials::bearer("my-token"),
///     None,
///     None,
/// )?;
///
/// // Or create from environment variables
/// let client = BitbucketClient::from_env()?;
///
/// let projects = client.projects().list(Limit::first(50)).await?;
/// let open = client
///     .pulls()
///     .list("PRJ", "my-repo", PullRequestState::Open, Limit::default())
///     .await?;
/// ```
pub struct BitbucketClient {
    transport: Arc<HttpTransport>,
    projects: ProjectsClient,
    repos: ReposClient,
    pulls: PullsClient,
    users: UsersClient,
    application: ApplicationClient,
}

impl BitbucketClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server URL, including any context path
    /// * `credentials` - How to authenticate
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Configuration for retry behavior (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let transport = Arc::new(HttpTransport::new(
            base_url,
            credentials,
            timeout,
            retry_config,
        )?);

        Ok(Self::with_transport(transport))
    }

    /// Build a client over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<HttpTransport>) -> Self {
        Self {
            projects: ProjectsClient::new(Arc::clone(&transport)),
            repos: ReposClient::new(Arc::clone(&transport)),
            pulls: PullsClient::new(Arc::clone(&transport)),
            users: UsersClient::new(Arc::clone(&transport)),
            application: ApplicationClient::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `BITBUCKET_BASE_URL` - Server URL (required)
    /// * `BITBUCKET_TOKEN` - HTTP access token (optional)
    /// * `BITBUCKET_USERNAME` / `BITBUCKET_PASSWORD` - Basic auth, used when
    ///   no token is set (optional, both or neither)
    /// * `BITBUCKET_TIMEOUT_SECS` - Request timeout (optional, default: 30)
    ///
    /// With none of the credential variables set the client is anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with_config(None)
    }

    /// Create a client from environment variables with a custom retry policy.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env_with_config(retry_config: Option<RetryConfig>) -> Result<Self, Error> {
        let base_url = env::var("BITBUCKET_BASE_URL").map_err(|_| {
            Error::Configuration("BITBUCKET_BASE_URL environment variable not set".to_string())
        })?;

        let credentials = credentials_from_vars(
            env::var("BITBUCKET_TOKEN").ok(),
            env::var("BITBUCKET_USERNAME").ok(),
            env::var("BITBUCKET_PASSWORD").ok(),
        )?;

        let timeout = timeout_from_var(env::var("BITBUCKET_TIMEOUT_SECS").ok())?;

        Self::new(&base_url, credentials, timeout, retry_config)
    }

    /// Get the underlying HTTP transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Get the projects client.
    #[must_use]
    pub fn projects(&self) -> &ProjectsClient {
        &self.projects
    }

    /// Get the repos client.
    #[must_use]
    pub fn repos(&self) -> &ReposClient {
        &self.repos
    }

    /// Get the pulls client.
    #[must_use]
    pub fn pulls(&self) -> &PullsClient {
        &self.pulls
    }

    /// Get the users client.
    #[must_use]
    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    /// Get the application client.
    #[must_use]
    pub fn application(&self) -> &ApplicationClient {
        &self.application
    }
}

/// Pick credentials from the optional token, username and password values.
fn credentials_from_vars(
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Credentials, Error> {
    let token = token.filter(|t| !t.is_empty());
    let username = username.filter(|u| !u.is_empty());

    match (token, username, password) {
        (Some(token), _, _) => Ok(Credentials::Bearer(token)),
        (None, Some(username), Some(password)) => Ok(Credentials::Basic { username, password }),
        (None, Some(_), None) => Err(Error::Configuration(
            "BITBUCKET_USERNAME is set but BITBUCKET_PASSWORD is not".to_string(),
        )),
        (None, None, Some(password)) if !password.is_empty() => Err(Error::Configuration(
            "BITBUCKET_PASSWORD is set but BITBUCKET_USERNAME is not".to_string(),
        )),
        (None, None, _) => Ok(Credentials::Anonymous),
    }
}

/// Parse `BITBUCKET_TIMEOUT_SECS`; unset means the default timeout.
fn timeout_from_var(raw: Option<String>) -> Result<Option<Duration>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(Error::Configuration(format!(
            "Invalid BITBUCKET_TIMEOUT_SECS: {raw}. Must be a positive whole number of seconds"
        ))),
    }
}

#[async_trait]
impl ProjectClient for BitbucketClient {
    async fn get_projects(&self, limit: Limit) -> Result<Page<Project>, Error> {
        self.projects.list(limit).await
    }

    async fn get_project_by_key(&self, project_key: &str) -> Result<Option<Project>, Error> {
        self.projects.get(project_key).await
    }

    async fn get_project_repositories(
        &self,
        project_key: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        self.projects.repositories(project_key, limit).await
    }

    async fn get_all_repositories(&self, limit: Limit) -> Result<Page<Repository>, Error> {
        self.repos.list_all(limit).await
    }

    async fn get_repository_by_slug(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>, Error> {
        self.repos.get(project_key, repository_slug).await
    }

    async fn get_repository_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: Option<&str>,
        limit: Limit,
    ) -> Result<Page<Branch>, Error> {
        self.repos
            .branches(project_key, repository_slug, query, limit)
            .await
    }

    async fn get_repository_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        limit: Limit,
    ) -> Result<Page<Repository>, Error> {
        self.repos.forks(project_key, repository_slug, limit).await
    }

    async fn get_repository_default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>, Error> {
        self.repos.default_branch(project_key, repository_slug).await
    }

    async fn get_repository_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        state: PullRequestState,
        limit: Limit,
    ) -> Result<Page<PullRequest>, Error> {
        self.pulls
            .list(project_key, repository_slug, state, limit)
            .await
    }

    async fn get_repository_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestChange>, Error> {
        self.pulls
            .changes(project_key, repository_slug, pull_request_id, limit)
            .await
    }

    async fn get_repository_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<PullRequestActivity>, Error> {
        self.pulls
            .activities(project_key, repository_slug, pull_request_id, limit)
            .await
    }

    async fn get_repository_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        limit: Limit,
    ) -> Result<Page<Task>, Error> {
        self.pulls
            .tasks(project_key, repository_slug, pull_request_id, limit)
            .await
    }

    async fn get_users(&self, limit: Limit) -> Result<Page<User>, Error> {
        self.users.list(limit).await
    }

    async fn get_application_properties(&self) -> Result<ApplicationProperties, Error> {
        self.application.properties().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BitbucketClient::new(
            "https://bitbucket.example.com",
            Credentials::Anonymous,
            None,
            None,
        )
        .expect("Client creation should succeed");

        assert_eq!(client.transport().base_url(), "https://bitbucket.example.com");
    }

    #[test]
    fn test_client_with_custom_timeout() {
        let _client = BitbucketClient::new(
            "https://bitbucket.example.com",
            Credentials::bearer("token"),
            Some(Duration::from_secs(60)),
            None,
        )
        .expect("Client creation should succeed");
    }

    #[test]
    fn test_token_wins_over_basic_auth() {
        let creds = credentials_from_vars(
            Some("tok".to_string()),
            Some("admin".to_string()),
            Some("secret".to_string()),
        )
        .unwrap();
        assert!(matches!(creds, Credentials::Bearer(t) if t == "tok"));
    }

    #[test]
    fn test_basic_auth_from_vars() {
        let creds =
            credentials_from_vars(None, Some("admin".to_string()), Some("secret".to_string()))
                .unwrap();
        assert!(matches!(creds, Credentials::Basic { username, .. } if username == "admin"));
    }

    #[test]
    fn test_username_without_password_is_rejected() {
        let result = credentials_from_vars(None, Some("admin".to_string()), None);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_password_without_username_is_rejected() {
        let result = credentials_from_vars(None, None, Some("secret".to_string()));
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("BITBUCKET_USERNAME")));
    }

    #[test]
    fn test_timeout_from_var() {
        assert_eq!(timeout_from_var(None).unwrap(), None);
        assert_eq!(
            timeout_from_var(Some(" 45 ".to_string())).unwrap(),
            Some(Duration::from_secs(45))
        );
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for raw in ["abc", "-5", "1.5", "0", ""] {
            let result = timeout_from_var(Some(raw.to_string()));
            assert!(
                matches!(result, Err(Error::Configuration(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_no_credentials_is_anonymous() {
        let creds = credentials_from_vars(Some(String::new()), None, None).unwrap();
        assert!(matches!(creds, Credentials::Anonymous));
    }
}
