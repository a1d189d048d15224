//! Core types for gitlab-mr

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw working-copy status as reported by the version control collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingCopyStatus {
    /// Current branch name (None when HEAD is detached)
    pub current: Option<String>,
    /// Paths with unresolved merge conflicts
    pub conflicted: Vec<String>,
    /// Paths newly added to the index
    pub created: Vec<String>,
    /// Deleted paths
    pub deleted: Vec<String>,
    /// Modified paths
    pub modified: Vec<String>,
    /// Untracked paths
    pub not_added: Vec<String>,
    /// Renamed paths
    pub renamed: Vec<String>,
}

/// Classified repository state used by every downstream decision
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RepositoryState {
    /// Current branch name ("HEAD" when detached)
    pub current_branch: String,
    /// Whether the current branch is the workflow's basis branch
    pub is_on_target_branch: bool,
    /// No created, deleted, modified, untracked or renamed paths
    pub is_clean: bool,
    /// Any conflicted paths (never true on a state that reached planning)
    pub has_conflicts: bool,
}

/// A git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Push URL
    pub push_url: String,
}

/// Protocol used to reach the forge's web UI and API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebProtocol {
    /// Plain HTTP (self-hosted instances only)
    Http,
    /// HTTPS
    Https,
}

impl std::fmt::Display for WebProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

/// Where the project lives on the forge, derived from the target remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    /// URL-encoded project path, used as the `:id` in API routes
    pub repo_id: String,
    /// Host (with port when the remote URL carried one over HTTP)
    pub repo_host: String,
    /// Web protocol for this host
    pub web_protocol: WebProtocol,
    /// Decoded project path (e.g., "group/sub/project")
    pub project_path: String,
}

impl RemoteDescriptor {
    /// API base URL, also the key for per-host tokens (e.g., `https://gitlab.example.com`)
    pub fn api_base_url(&self) -> String {
        format!("{}://{}", self.web_protocol, self.repo_host)
    }

    /// Project web URL (e.g., `https://gitlab.com/group/project`)
    pub fn web_url(&self) -> String {
        format!("{}/{}", self.api_base_url(), self.project_path)
    }
}

/// A forge user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.username)
    }
}

/// A forge group (used as an approver group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Numeric group id
    pub id: u64,
    /// Group name
    #[serde(default)]
    pub name: String,
}

/// A merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped MR number
    pub iid: u64,
    /// MR title
    pub title: String,
    /// Branch being merged
    pub source_branch: String,
    /// Branch merged into
    pub target_branch: String,
    /// MR description
    pub description: Option<String>,
    /// Web URL for the MR
    pub web_url: String,
    /// Whether the MR is marked work in progress
    pub work_in_progress: bool,
    /// Current assignee
    pub assignee: Option<User>,
    /// Labels
    pub labels: BTreeSet<String>,
    /// Last update time
    pub updated_at: Option<DateTime<Utc>>,
}

/// Approval configuration of a merge request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalConfig {
    /// Individual approvers
    pub approvers: Vec<User>,
    /// Approver groups
    pub approver_groups: Vec<Group>,
}

impl ApprovalConfig {
    /// Ids of the individual approvers
    pub fn approver_ids(&self) -> BTreeSet<u64> {
        self.approvers.iter().map(|u| u.id).collect()
    }

    /// Ids of the approver groups
    pub fn approver_group_ids(&self) -> BTreeSet<u64> {
        self.approver_groups.iter().map(|g| g.id).collect()
    }
}

/// A forge project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project id
    pub id: u64,
    /// Full path (e.g., "group/project")
    pub path_with_namespace: String,
    /// Project web URL
    pub web_url: String,
    /// Default branch, absent for empty repositories
    pub default_branch: Option<String>,
}

/// MR state filter for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MrState {
    /// Open MRs
    Opened,
    /// Closed MRs
    Closed,
    /// Merged MRs
    Merged,
    /// Every state
    All,
}

impl MrState {
    /// Query parameter value used by the GitLab API
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::All => "all",
        }
    }
}

/// Parameters for creating a merge request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMrParams {
    /// Branch being merged
    pub source_branch: String,
    /// Branch merged into
    pub target_branch: String,
    /// MR title
    pub title: String,
    /// MR description
    pub description: Option<String>,
    /// Delete the source branch once merged
    pub remove_source_branch: bool,
    /// Squash commits when merging
    pub squash: bool,
    /// Users to assign
    pub assignee_ids: Vec<u64>,
    /// Labels to apply
    pub labels: Vec<String>,
}

/// Partial update of a merge request; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MrUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New assignee; `Some(None)` clears it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<u64>>,
}

/// Replacement approver sets for a merge request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApproverUpdate {
    /// Individual approver ids
    pub approver_ids: Vec<u64>,
    /// Approver group ids
    pub approver_group_ids: Vec<u64>,
}

/// Arguments for switching branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutArgs {
    /// Switch to an existing local branch
    Existing(String),
    /// Create a local branch tracking `upstream` (e.g., "origin/feature")
    Track {
        /// Local branch name
        branch: String,
        /// Remote-tracking ref to start from
        upstream: String,
    },
}

impl std::fmt::Display for CheckoutArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Existing(branch) => write!(f, "{branch}"),
            Self::Track { branch, upstream } => write!(f, "-b {branch} {upstream}"),
        }
    }
}
