//! Bitbucket REST client for Rust
//!
//! Typed, async, read-only access to the Bitbucket Server / Data Center REST
//! API: projects, repositories, branches, forks, pull requests with their
//! changes, activities and tasks, users and application properties.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bitbucket_rest_client::{BitbucketClient, Credentials, Limit};
//! use bitbucket_rest_client::pagination::collect_all;
//!
//! let client = BitbucketClient::new(
//!     "https://bitbucket.example.com",
//!     Credentials::basic("jcitizen", "password"),
//!     None,
//!     None,
//! )?;
//!
//! let first_page = client.projects().list(Limit::first(25)).await?;
//! let every_project = collect_all(Limit::first(100), None, |l| client.projects().list(l)).await?;
//! ```
//!
//! Paging follows the server's start/limit convention: each list accessor
//! takes a [`Limit`] and returns a [`Page`], whose [`Page::next_limit`] gives
//! the window of the following page.

pub mod client;
pub mod clients;
pub mod error;
pub mod pagination;
pub mod project_client;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::BitbucketClient;
pub use clients::{ApplicationClient, ProjectsClient, PullsClient, ReposClient, UsersClient};
pub use error::{BitbucketError, Error};
pub use pagination::collect_all;
pub use project_client::ProjectClient;
pub use transport::{Credentials, HttpTransport, RetryConfig};
pub use types::{
    ActivityKind, ApplicationProperties, Branch, ChangeType, Comment, CommentAnchor, Limit, Link,
    Links, NodeType, Page, Path, Project, ProjectType, PullRequest, PullRequestActivity,
    PullRequestChange, PullRequestParticipant, PullRequestRef, PullRequestState, Repository,
    RepositoryState, Task, TaskState, User, UserType,
};
