//! User data models.

use serde::{Deserialize, Serialize};

use super::links::Links;

/// Kind of Bitbucket account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Normal,
    Service,
    #[serde(other)]
    Unknown,
}

impl Default for UserType {
    fn default() -> Self {
        Self::Normal
    }
}

/// A Bitbucket user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login name
    pub name: String,
    pub email_address: Option<String>,
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub active: bool,
    /// URL-safe identifier used in REST paths
    pub slug: String,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    #[serde(default)]
    pub links: Links,
}
