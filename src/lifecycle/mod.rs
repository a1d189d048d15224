//! Merge request lifecycle on top of a [`ForgeClient`]
//!
//! Adds what the raw API does not give directly: recovery of the existing MR
//! on a duplicate-create conflict, the "nothing to select" signal for empty
//! lists, and web URLs for manual fallback.

use crate::error::{Error, Result};
use crate::platform::ForgeClient;
use crate::types::{
    ApprovalConfig, ApproverUpdate, CreateMrParams, MergeRequest, MrState, MrUpdate, Project,
    RemoteDescriptor, User,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Matches the `!<iid>` MR reference GitLab puts in duplicate-MR messages
static MR_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!(\d+)").expect("MR reference pattern is valid"));

/// Extract the first `!<digits>` reference from a forge message.
pub fn parse_mr_reference(message: &str) -> Option<u64> {
    MR_REFERENCE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Merge request operations for the project behind the target remote
pub struct MrLifecycle {
    forge: Box<dyn ForgeClient>,
    remote: RemoteDescriptor,
}

impl MrLifecycle {
    /// Wrap a forge client for the project described by `remote`
    pub fn new(forge: Box<dyn ForgeClient>, remote: RemoteDescriptor) -> Self {
        Self { forge, remote }
    }

    /// The project's remote descriptor
    pub const fn remote(&self) -> &RemoteDescriptor {
        &self.remote
    }

    /// Open a merge request.
    ///
    /// A duplicate-resource conflict becomes [`Error::DuplicateMergeRequest`]
    /// with the iid of the existing MR when the forge message names it.
    /// Nothing is retried.
    pub async fn create(&self, params: &CreateMrParams) -> Result<MergeRequest> {
        match self.forge.create_merge_request(params).await {
            Err(Error::Conflict(message)) => {
                let iid = parse_mr_reference(&message);
                debug!(?iid, "MR already exists");
                Err(Error::DuplicateMergeRequest { iid, message })
            }
            other => other,
        }
    }

    /// Open merge requests, in forge order.
    ///
    /// An empty result is [`Error::NoMergeRequestsFound`]: nothing to select.
    pub async fn list(&self) -> Result<Vec<MergeRequest>> {
        self.list_in_state(MrState::Opened).await
    }

    /// Merge requests in `state`; empty is [`Error::NoMergeRequestsFound`]
    pub async fn list_in_state(&self, state: MrState) -> Result<Vec<MergeRequest>> {
        debug!(state = state.as_query(), "listing MRs");
        let mrs = self.forge.list_merge_requests(state).await?;
        if mrs.is_empty() {
            return Err(Error::NoMergeRequestsFound);
        }
        Ok(mrs)
    }

    /// Patch a merge request
    pub async fn update(&self, iid: u64, update: &MrUpdate) -> Result<MergeRequest> {
        self.forge.update_merge_request(iid, update).await
    }

    /// Approval configuration of a merge request
    pub async fn get_approval_config(&self, iid: u64) -> Result<ApprovalConfig> {
        self.forge.get_approvals(iid).await
    }

    /// Replace the approver sets of a merge request
    pub async fn update_approvers(&self, iid: u64, update: &ApproverUpdate) -> Result<()> {
        self.forge.update_approvers(iid, update).await
    }

    /// Search users; may be empty
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.forge.search_users(query).await
    }

    /// Look up a user by exact username (case-insensitive)
    pub async fn find_user(&self, username: &str) -> Result<User> {
        let username = username.trim().trim_start_matches('@');
        self.forge
            .search_users(username)
            .await?
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }

    /// Project label names
    pub async fn list_labels(&self) -> Result<Vec<String>> {
        self.forge.list_labels().await
    }

    /// The project itself
    pub async fn project(&self) -> Result<Project> {
        self.forge.get_project().await
    }

    /// Web URL of an existing merge request
    pub fn build_existing_mr_url(&self, iid: u64) -> String {
        format!("{}/merge_requests/{iid}", self.remote.web_url())
    }

    /// Web form for creating the merge request by hand
    pub fn build_create_url(&self, source_branch: &str, target_branch: &str) -> String {
        format!(
            "{}/merge_requests/new?merge_request%5Bsource_branch%5D={}&merge_request%5Btarget_branch%5D={}",
            self.remote.web_url(),
            urlencoding::encode(source_branch),
            urlencoding::encode(target_branch)
        )
    }
}
