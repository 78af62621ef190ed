//! Hypermedia links attached to most Bitbucket resources.

use serde::{Deserialize, Serialize};

/// A single link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    /// Link name, e.g. `http` or `ssh` for clone links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `links` object of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Browser URLs of the resource itself
    #[serde(rename = "self", default, skip_serializing_if = "Vec::is_empty")]
    pub self_links: Vec<Link>,
    /// Clone URLs (repositories only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clone: Vec<Link>,
}

impl Links {
    /// First `self` link, if any.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.self_links.first().map(|l| l.href.as_str())
    }

    /// Clone URL with the given name (`http`, `ssh`).
    #[must_use]
    pub fn clone_href(&self, name: &str) -> Option<&str> {
        self.clone
            .iter()
            .find(|l| l.name.as_deref() == Some(name))
            .map(|l| l.href.as_str())
    }
}
