//! Data model types for the Bitbucket REST API.
//!
//! Field names mirror the server's JSON (camelCase on the wire); timestamps
//! arrive as epoch milliseconds and are exposed as `DateTime<Utc>`.

pub mod activities;
pub mod application;
pub mod links;
pub mod page;
pub mod projects;
pub mod pulls;
pub mod repos;
pub mod users;

// Re-exports
pub use activities::{
    ActivityKind, Comment, CommentAction, CommentAnchor, Commit, FileType, LineType,
    PermittedOperations, Person, PullRequestActivity, RescopedCommits, Task, TaskAnchor,
    TaskState,
};
pub use application::ApplicationProperties;
pub use links::{Link, Links};
pub use page::{Limit, Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use projects::{Project, ProjectType};
pub use pulls::{
    ChangeType, NodeType, ParticipantRole, ParticipantStatus, Path, PullRequest,
    PullRequestChange, PullRequestParticipant, PullRequestRef, PullRequestState,
};
pub use repos::{Branch, RefType, Repository, RepositoryState};
pub use users::{User, UserType};
