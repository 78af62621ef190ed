//! Repository and branch data models.

use serde::{Deserialize, Serialize};

use super::links::Links;
use super::projects::Project;

/// Lifecycle state of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryState {
    Available,
    Initialising,
    InitialisationFailed,
    #[serde(other)]
    Unknown,
}

/// Repository information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// URL-safe identifier, unique within the project
    pub slug: String,
    pub id: i64,
    pub name: String,
    /// SCM backing the repository, normally `git`
    pub scm_id: String,
    pub state: RepositoryState,
    pub status_message: Option<String>,
    #[serde(default)]
    pub forkable: bool,
    #[serde(default)]
    pub public: bool,
    pub project: Project,
    /// Repository this one was forked from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Box<Repository>>,
    #[serde(default)]
    pub links: Links,
}

impl Repository {
    #[must_use]
    pub fn is_fork(&self) -> bool {
        self.origin.is_some()
    }

    #[must_use]
    pub fn http_clone_url(&self) -> Option<&str> {
        self.links.clone_href("http")
    }

    #[must_use]
    pub fn ssh_clone_url(&self) -> Option<&str> {
        self.links.clone_href("ssh")
    }
}

/// Kind of git ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefType {
    Branch,
    Tag,
    #[serde(other)]
    Unknown,
}

impl Default for RefType {
    fn default() -> Self {
        Self::Branch
    }
}

/// A repository branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Fully qualified ref name, e.g. `refs/heads/master`
    pub id: String,
    /// Short name, e.g. `master`
    pub display_id: String,
    #[serde(rename = "type", default)]
    pub branch_type: RefType,
    /// Hash of the commit at the tip of the branch
    pub latest_commit: Option<String>,
    /// Older servers report the tip under this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_changeset: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Branch {
    /// Tip commit, whichever field the server filled in.
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.latest_commit
            .as_deref()
            .or(self.latest_changeset.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_deserialize() {
        let json = r#"{
            "slug": "my-repo",
            "id": 1,
            "name": "My repo",
            "scmId": "git",
            "state": "AVAILABLE",
            "statusMessage": "Available",
            "forkable": true,
            "project": {
                "key": "PRJ",
                "id": 1,
                "name": "My Cool Project",
                "description": "The description for my cool project.",
                "public": true,
                "type": "NORMAL"
            },
            "public": true,
            "links": {
                "clone": [
                    {"href": "ssh://git@bitbucket.example.com:7999/prj/my-repo.git", "name": "ssh"},
                    {"href": "https://bitbucket.example.com/scm/prj/my-repo.git", "name": "http"}
                ],
                "self": [{"href": "https://bitbucket.example.com/projects/PRJ/repos/my-repo/browse"}]
            }
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.slug, "my-repo");
        assert_eq!(repo.state, RepositoryState::Available);
        assert_eq!(repo.project.key, "PRJ");
        assert!(!repo.is_fork());
        assert_eq!(
            repo.http_clone_url(),
            Some("https://bitbucket.example.com/scm/prj/my-repo.git")
        );
        assert_eq!(
            repo.ssh_clone_url(),
            Some("ssh://git@bitbucket.example.com:7999/prj/my-repo.git")
        );
    }

    #[test]
    fn test_branch_tip_falls_back_to_changeset() {
        let json = r#"{
            "id": "refs/heads/legacy",
            "displayId": "legacy",
            "latestChangeset": "8d51122def5632836d1cb1026e879069e10a1e13"
        }"#;

        let branch: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(branch.branch_type, RefType::Branch);
        assert!(!branch.is_default);
        assert_eq!(branch.tip(), Some("8d51122def5632836d1cb1026e879069e10a1e13"));
    }
}
