//! Pull request activity, comment and task models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::users::User;

/// What the current user may do with a comment or task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermittedOperations {
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub deletable: bool,
    /// Whether a task may be resolved or reopened
    #[serde(default)]
    pub transitionable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Open,
    Resolved,
    #[serde(other)]
    Unknown,
}

/// Comment a task is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnchor {
    pub id: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub anchor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

/// A pull request task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
    pub author: User,
    pub text: String,
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<TaskAnchor>,
    #[serde(default)]
    pub permitted_operations: PermittedOperations,
}

impl Task {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == TaskState::Open
    }
}

/// A pull request comment and its replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub version: u32,
    pub text: String,
    pub author: User,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_date: DateTime<Utc>,
    /// Replies
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub permitted_operations: PermittedOperations,
}

impl Comment {
    /// Number of comments in this thread, including this one.
    #[must_use]
    pub fn thread_len(&self) -> usize {
        1 + self.comments.iter().map(Comment::thread_len).sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentAction {
    Added,
    Edited,
    Deleted,
    Replied,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineType {
    Added,
    Removed,
    Context,
    #[serde(other)]
    Unknown,
}

/// Side of the diff a line comment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    From,
    To,
    #[serde(other)]
    Unknown,
}

/// Location of a file or line comment in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAnchor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_hash: Option<String>,
    /// Absent for file-level comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_path: Option<String>,
}

/// Commit author as recorded in git.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Commit summary embedded in activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: String,
    pub display_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Commits added to or removed from a pull request by a rescope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RescopedCommits {
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Total count, which may exceed `commits.len()`
    #[serde(default)]
    pub total: u32,
}

/// Action-specific part of an activity, keyed by the `action` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    #[serde(rename_all = "camelCase")]
    Commented {
        comment_action: CommentAction,
        comment: Comment,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment_anchor: Option<CommentAnchor>,
    },
    #[serde(rename_all = "camelCase")]
    Rescoped {
        from_hash: String,
        previous_from_hash: String,
        to_hash: String,
        previous_to_hash: String,
        #[serde(default)]
        added: RescopedCommits,
        #[serde(default)]
        removed: RescopedCommits,
    },
    Merged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        commit: Option<Commit>,
    },
    Approved,
    Unapproved,
    Reviewed,
    Opened,
    Declined,
    Reopened,
    Updated,
    /// Action this client does not model
    #[serde(other)]
    Other,
}

/// An entry in a pull request's activity stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestActivity {
    pub id: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
    pub user: User,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl PullRequestActivity {
    /// The comment carried by a `COMMENTED` activity.
    #[must_use]
    pub fn comment(&self) -> Option<&Comment> {
        match &self.kind {
            ActivityKind::Commented { comment, .. } => Some(comment),
            _ => None,
        }
    }
}
