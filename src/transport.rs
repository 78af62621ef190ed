//! HTTP transport for the Bitbucket REST client.
//!
//! Handles URL building, authentication, automatic retry and mapping of
//! error responses to typed errors.

use std::fmt;
use std::time::Duration;

use rand::thread_rng;
use rand::Rng;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{BitbucketError, Error};
use crate::types::{Limit, Page};

/// Path prefix of the core REST API.
pub const API_PREFIX: &str = "/rest/api/1.0";

/// How requests authenticate against the server.
#[derive(Clone, Default)]
pub enum Credentials {
    /// No authentication; only public resources are visible.
    #[default]
    Anonymous,
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// HTTP access token (personal, project or repository token).
    Bearer(String),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer(token) => request.bearer_auth(token),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// A configuration that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Percent-encode a single path segment (project key, repository slug).
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// HTTP transport layer shared by all resource clients.
///
/// Every request is an idempotent GET, so any failure listed in
/// [`RetryConfig::retry_on`] and any network error is retried.
pub struct HttpTransport {
    base_url: String,
    credentials: Credentials,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server URL, e.g. `https://bitbucket.example.com` (a
    ///   context path such as `/bitbucket` is kept)
    /// * `credentials` - How to authenticate
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or the HTTP client
    /// cannot be created.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Unsupported URL scheme '{}' in {base_url}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bitbucket-rest-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// Full URL of an API path such as `/projects`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns a `BitbucketError` on API errors, `Error::Http` on network
    /// failures and `Error::Serialization` if the body does not match `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let response = self.execute_with_retry(path, params).await?;
        Self::decode(response).await
    }

    /// GET a single resource that may not exist.
    ///
    /// A 404, or a 204 with no body, yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`HttpTransport::get`] for every other failure.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        let response = match self.execute_with_retry(path, params).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                debug!(path, "Resource not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response: {e}")))?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body).map(Some).map_err(Error::from)
    }

    /// GET one page of a paged resource.
    ///
    /// # Errors
    ///
    /// Same as [`HttpTransport::get`].
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: Limit,
        extra: &[(&str, String)],
    ) -> Result<Page<T>, Error> {
        let mut params: Vec<(&str, String)> = extra.to_vec();
        params.extend(limit.query_params());
        self.get(path, &params).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response: {e}")))?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Execute a GET with automatic retry on retryable errors.
    ///
    /// Returns the first successful response.
    async fn execute_with_retry(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Response, Error> {
        let url = self.url(path);
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            debug!(method = "GET", path, attempt, "Sending Bitbucket request");

            let request = self
                .client
                .get(&url)
                .header(ACCEPT, "application/json")
                .query(params);

            match self.credentials.apply(request).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = Self::parse_error_response(response).await;

                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    let retry_after = match &error {
                        Error::Bitbucket(e) => e.retry_after(),
                        _ => None,
                    };
                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    warn!(
                        path,
                        status = status.as_u16(),
                        attempt,
                        wait_secs = wait_time,
                        "Retrying Bitbucket request"
                    );

                    last_error = Some(error);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    let error = Error::Http(e.to_string());

                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(error);
                    }

                    let wait_time = self.get_backoff_time(attempt, None);
                    warn!(
                        path,
                        attempt,
                        wait_secs = wait_time,
                        error = %error,
                        "Retrying Bitbucket request after network error"
                    );

                    last_error = Some(error);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Http("Request failed after maximum retries".to_string())
        }))
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra).min(self.retry_config.max_backoff);
            }
        }

        // Exponential backoff: backoff_factor ^ attempt
        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        let wait_time = if self.retry_config.jitter > 0.0 && base_wait > 0.0 {
            let jitter_range = base_wait * self.retry_config.jitter;
            let mut rng = thread_rng();
            base_wait + rng.gen_range(-jitter_range..jitter_range)
        } else {
            base_wait
        };

        wait_time.min(self.retry_config.max_backoff).max(0.0)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(response: Response) -> Error {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        let body = response.text().await.unwrap_or_default();

        Error::Bitbucket(BitbucketError::from_response(status, &body, retry_after))
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }
}
