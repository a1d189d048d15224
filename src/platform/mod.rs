//! Forge access
//!
//! `ForgeClient` is the raw request/response surface of the GitLab API for a
//! single project. Workflow code never talks to it directly; it goes through
//! [`MrLifecycle`](crate::lifecycle::MrLifecycle), which adds duplicate
//! recovery and web URL construction.

mod gitlab;

pub use gitlab::{GitLabService, extract_error_message};

use crate::error::Result;
use crate::types::{
    ApprovalConfig, ApproverUpdate, CreateMrParams, MergeRequest, MrState, MrUpdate, Project,
    User,
};
use async_trait::async_trait;

/// Raw GitLab operations scoped to one project
///
/// Implementations report HTTP 409 as [`Error::Conflict`] and every other
/// non-success status as [`Error::GitLabApi`], carrying the forge's message
/// verbatim. Nothing is retried.
///
/// [`Error::Conflict`]: crate::error::Error::Conflict
/// [`Error::GitLabApi`]: crate::error::Error::GitLabApi
#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Fetch the project
    async fn get_project(&self) -> Result<Project>;

    /// Open a merge request
    async fn create_merge_request(&self, params: &CreateMrParams) -> Result<MergeRequest>;

    /// List merge requests in the given state, in forge order
    async fn list_merge_requests(&self, state: MrState) -> Result<Vec<MergeRequest>>;

    /// Patch a merge request
    async fn update_merge_request(&self, iid: u64, update: &MrUpdate) -> Result<MergeRequest>;

    /// Read the approval configuration of a merge request
    async fn get_approvals(&self, iid: u64) -> Result<ApprovalConfig>;

    /// Replace the approvers of a merge request
    async fn update_approvers(&self, iid: u64, update: &ApproverUpdate) -> Result<()>;

    /// Names of the project's labels
    async fn list_labels(&self) -> Result<Vec<String>>;

    /// Search users by name, username or email
    async fn search_users(&self, query: &str) -> Result<Vec<User>>;
}
