//! Error types for the Bitbucket REST client.

use serde::Deserialize;
use thiserror::Error;

/// Main error type for the Bitbucket REST client.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed base URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Bitbucket API error
    #[error(transparent)]
    Bitbucket(#[from] BitbucketError),
}

impl Error {
    /// Returns `true` if this is a 404 reported by the server.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Bitbucket(BitbucketError::NotFound { .. }))
    }
}

/// Typed errors for Bitbucket API failures, classified by HTTP status.
#[derive(Error, Debug, Clone)]
pub enum BitbucketError {
    /// Missing or rejected credentials (401).
    #[error("[{status}] {message}")]
    Authentication {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },

    /// Authenticated user lacks the required permission (403).
    #[error("[{status}] {message}")]
    Authorization {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },

    /// Project, repository or other resource does not exist (404).
    #[error("[{status}] {message}")]
    NotFound {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },

    /// Request conflicts with the resource state (409).
    #[error("[{status}] {message}")]
    Conflict {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },

    /// Rate limited by the server (429).
    ///
    /// `retry_after` is the server's `Retry-After` value in seconds, if sent.
    #[error("[{status}] {message}")]
    RateLimited {
        status: u16,
        message: String,
        retry_after: Option<u32>,
        exception_name: Option<String>,
    },

    /// Any other client error (4xx).
    #[error("[{status}] {message}")]
    Validation {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },

    /// Server-side failure (5xx).
    #[error("[{status}] {message}")]
    Server {
        status: u16,
        message: String,
        exception_name: Option<String>,
    },
}

impl BitbucketError {
    /// Classify an error response.
    ///
    /// `body` is the raw response body. Bitbucket reports failures as
    /// `{"errors": [{"message": ..., "exceptionName": ...}]}`; when the body
    /// has another shape the message falls back to `HTTP <status>`.
    #[must_use]
    pub fn from_response(status: u16, body: &str, retry_after: Option<u32>) -> Self {
        let first = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.errors.into_iter().next());

        let (message, exception_name) = match first {
            Some(detail) => (
                detail.message.unwrap_or_else(|| format!("HTTP {status}")),
                detail.exception_name,
            ),
            None => (format!("HTTP {status}"), None),
        };

        match status {
            401 => Self::Authentication {
                status,
                message,
                exception_name,
            },
            403 => Self::Authorization {
                status,
                message,
                exception_name,
            },
            404 => Self::NotFound {
                status,
                message,
                exception_name,
            },
            409 => Self::Conflict {
                status,
                message,
                exception_name,
            },
            429 => Self::RateLimited {
                status,
                message,
                retry_after,
                exception_name,
            },
            s if s >= 500 => Self::Server {
                status,
                message,
                exception_name,
            },
            _ => Self::Validation {
                status,
                message,
                exception_name,
            },
        }
    }

    /// Get the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Authentication { status, .. }
            | Self::Authorization { status, .. }
            | Self::NotFound { status, .. }
            | Self::Conflict { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Validation { status, .. }
            | Self::Server { status, .. } => *status,
        }
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message,
        }
    }

    /// Get the server-side exception class name if one was reported.
    #[must_use]
    pub fn exception_name(&self) -> Option<&str> {
        match self {
            Self::Authentication { exception_name, .. }
            | Self::Authorization { exception_name, .. }
            | Self::NotFound { exception_name, .. }
            | Self::Conflict { exception_name, .. }
            | Self::RateLimited { exception_name, .. }
            | Self::Validation { exception_name, .. }
            | Self::Server { exception_name, .. } => exception_name.as_deref(),
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    message: Option<String>,
    exception_name: Option<String>,
}
