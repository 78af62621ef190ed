//! Pull request data models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::links::Links;
use super::repos::Repository;
use super::users::User;

/// Pull request state, also used as the list filter.
///
/// `All` only makes sense as a filter; the server never reports it on a
/// pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    Open,
    Declined,
    Merged,
    All,
}

impl PullRequestState {
    /// Wire name, as sent in the `state` query parameter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Declined => "DECLINED",
            Self::Merged => "MERGED",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "DECLINED" => Ok(Self::Declined),
            "MERGED" => Ok(Self::Merged),
            "ALL" => Ok(Self::All),
            other => Err(format!("unknown pull request state: {other}")),
        }
    }
}

/// Role of a pull request participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Author,
    Reviewer,
    Participant,
    #[serde(other)]
    Unknown,
}

/// Review verdict of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Unapproved,
    NeedsWork,
    Approved,
    #[serde(other)]
    Unknown,
}

impl Default for ParticipantStatus {
    fn default() -> Self {
        Self::Unapproved
    }
}

/// Author, reviewer or other participant of a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestParticipant {
    pub user: User,
    pub role: ParticipantRole,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub status: ParticipantStatus,
}

/// Source or target ref of a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRef {
    /// Fully qualified ref name
    pub id: String,
    pub display_id: String,
    pub latest_commit: Option<String>,
    pub repository: Repository,
}

/// Pull request information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Identifier, unique within the target repository
    pub id: u64,
    /// Optimistic locking version
    pub version: u32,
    pub title: String,
    pub description: Option<String>,
    pub state: PullRequestState,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_date: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_date: Option<DateTime<Utc>>,
    pub from_ref: PullRequestRef,
    pub to_ref: PullRequestRef,
    #[serde(default)]
    pub locked: bool,
    pub author: PullRequestParticipant,
    #[serde(default)]
    pub reviewers: Vec<PullRequestParticipant>,
    #[serde(default)]
    pub participants: Vec<PullRequestParticipant>,
    #[serde(default)]
    pub links: Links,
}

impl PullRequest {
    /// Reviewers that approved the pull request.
    pub fn approvers(&self) -> impl Iterator<Item = &User> {
        self.reviewers
            .iter()
            .filter(|r| r.approved)
            .map(|r| &r.user)
    }
}

/// Kind of change made to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Add,
    Copy,
    Delete,
    Modify,
    Move,
    #[serde(other)]
    Unknown,
}

/// Kind of node a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    File,
    Directory,
    Submodule,
    #[serde(other)]
    Unknown,
}

/// Repository path, split into components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub components: Vec<String>,
    /// Parent directory, empty at the repository root
    #[serde(default)]
    pub parent: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Full path joined with `/`
    #[serde(rename = "toString")]
    pub full: String,
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// A file changed by a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestChange {
    pub content_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_content_id: Option<String>,
    pub path: Path,
    /// Previous path for moves and copies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_path: Option<Path>,
    #[serde(default)]
    pub executable: bool,
    /// `-1` unless the change is a move or copy
    #[serde(default = "unknown_percent")]
    pub percent_unchanged: i32,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub node_type: NodeType,
}

fn unknown_percent() -> i32 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        assert_eq!(PullRequestState::Open.to_string(), "OPEN");
        assert_eq!(PullRequestState::All.as_str(), "ALL");
        assert_eq!(
            serde_json::to_string(&PullRequestState::Declined).unwrap(),
            "\"DECLINED\""
        );
        assert_eq!("merged".parse::<PullRequestState>(), Ok(PullRequestState::Merged));
        assert!("closed".parse::<PullRequestState>().is_err());
    }

    #[test]
    fn test_change_deserialize_move() {
        let json = r#"{
            "contentId": "abcdef0123456789abcdef0123456789abcdef01",
            "fromContentId": "bcdef0123456789abcdef0123456789abcdef012",
            "path": {
                "components": ["new", "path", "to", "file.txt"],
                "parent": "new/path/to",
                "name": "file.txt",
                "extension": "txt",
                "toString": "new/path/to/file.txt"
            },
            "srcPath": {
                "components": ["old", "file.txt"],
                "parent": "old",
                "name": "file.txt",
                "extension": "txt",
                "toString": "old/file.txt"
            },
            "executable": false,
            "percentUnchanged": 98,
            "type": "MOVE",
            "nodeType": "FILE",
            "properties": {"gitChangeType": "RENAME"}
        }"#;

        let change: PullRequestChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.change_type, ChangeType::Move);
        assert_eq!(change.node_type, NodeType::File);
        assert_eq!(change.percent_unchanged, 98);
        assert_eq!(change.path.to_string(), "new/path/to/file.txt");
        assert_eq!(change.src_path.map(|p| p.full), Some("old/file.txt".to_string()));
    }

    #[test]
    fn test_change_defaults() {
        let json = r#"{
            "contentId": "abc",
            "path": {"components": ["README"], "name": "README", "toString": "README"},
            "type": "ADD",
            "nodeType": "FILE"
        }"#;

        let change: PullRequestChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.percent_unchanged, -1);
        assert_eq!(change.path.parent, "");
        assert!(change.path.extension.is_none());
    }
}
