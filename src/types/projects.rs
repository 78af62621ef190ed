//! Project data models.

use serde::{Deserialize, Serialize};

use super::links::Links;
use super::users::User;

/// Whether a project is a regular project or a user's personal project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    Normal,
    Personal,
    #[serde(other)]
    Unknown,
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::Normal
    }
}

/// A Bitbucket project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Short upper-case project key
    pub key: String,
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    /// Owner of a personal project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(default)]
    pub links: Links,
}

impl Project {
    #[must_use]
    pub fn is_personal(&self) -> bool {
        self.project_type == ProjectType::Personal
    }
}
