//! Mock forge client for testing
//!
//! Manually implements `ForgeClient`; clones share state so a test can hand
//! one clone to `MrLifecycle` and inspect calls through another.

use async_trait::async_trait;
use gitlab_mr::error::{Error, Result};
use gitlab_mr::platform::ForgeClient;
use gitlab_mr::types::{
    ApprovalConfig, ApproverUpdate, CreateMrParams, MergeRequest, MrState, MrUpdate, Project,
    User,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Failure the mock returns instead of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgeFailure {
    /// HTTP 409 with this message
    Conflict(String),
    /// Any other API failure with this message
    Api(String),
}

impl ForgeFailure {
    fn to_error(&self) -> Error {
        match self {
            Self::Conflict(msg) => Error::Conflict(msg.clone()),
            Self::Api(msg) => Error::GitLabApi(msg.clone()),
        }
    }
}

#[derive(Default)]
struct ForgeState {
    next_iid: AtomicU64,
    mrs: Mutex<Vec<MergeRequest>>,
    users: Mutex<Vec<User>>,
    labels: Mutex<Vec<String>>,
    approvals: Mutex<ApprovalConfig>,
    default_branch: Mutex<Option<String>>,
    // Call tracking
    create_calls: Mutex<Vec<CreateMrParams>>,
    list_calls: Mutex<Vec<MrState>>,
    update_calls: Mutex<Vec<(u64, MrUpdate)>>,
    get_approvals_calls: Mutex<Vec<u64>>,
    update_approvers_calls: Mutex<Vec<(u64, ApproverUpdate)>>,
    search_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_create: Mutex<Option<ForgeFailure>>,
    error_on_update: Mutex<Option<ForgeFailure>>,
    error_on_update_approvers: Mutex<Option<ForgeFailure>>,
}

/// Simple mock forge
///
/// Features:
/// - Auto-incrementing iids for created MRs (starting at 1)
/// - Call tracking for verification
/// - Error injection per operation
#[derive(Clone, Default)]
pub struct MockForge {
    state: Arc<ForgeState>,
}

impl MockForge {
    /// Empty forge: no MRs, no users, project default branch `main`
    pub fn new() -> Self {
        let forge = Self::default();
        forge.state.next_iid.store(1, Ordering::SeqCst);
        *forge.state.default_branch.lock().unwrap() = Some("main".to_string());
        forge
    }

    // === Setup ===

    /// Add an existing MR
    pub fn add_mr(&self, mr: MergeRequest) {
        self.state.mrs.lock().unwrap().push(mr);
    }

    /// Add a user visible to search
    pub fn add_user(&self, user: User) {
        self.state.users.lock().unwrap().push(user);
    }

    /// Set the project labels
    pub fn set_labels(&self, labels: &[&str]) {
        *self.state.labels.lock().unwrap() = labels.iter().map(ToString::to_string).collect();
    }

    /// Set the approval configuration returned for every MR
    pub fn set_approvals(&self, config: ApprovalConfig) {
        *self.state.approvals.lock().unwrap() = config;
    }

    // === Error injection ===

    /// Make `create_merge_request` fail
    pub fn fail_create(&self, failure: ForgeFailure) {
        *self.state.error_on_create.lock().unwrap() = Some(failure);
    }

    /// Make `update_merge_request` fail
    pub fn fail_update(&self, failure: ForgeFailure) {
        *self.state.error_on_update.lock().unwrap() = Some(failure);
    }

    /// Make `update_approvers` fail
    pub fn fail_update_approvers(&self, failure: ForgeFailure) {
        *self.state.error_on_update_approvers.lock().unwrap() = Some(failure);
    }

    // === Call verification ===

    /// All `create_merge_request` calls
    pub fn create_calls(&self) -> Vec<CreateMrParams> {
        self.state.create_calls.lock().unwrap().clone()
    }

    /// States passed to `list_merge_requests`
    pub fn list_calls(&self) -> Vec<MrState> {
        self.state.list_calls.lock().unwrap().clone()
    }

    /// All `update_merge_request` calls
    pub fn update_calls(&self) -> Vec<(u64, MrUpdate)> {
        self.state.update_calls.lock().unwrap().clone()
    }

    /// iids passed to `get_approvals`
    pub fn get_approvals_calls(&self) -> Vec<u64> {
        self.state.get_approvals_calls.lock().unwrap().clone()
    }

    /// All `update_approvers` calls
    pub fn update_approvers_calls(&self) -> Vec<(u64, ApproverUpdate)> {
        self.state.update_approvers_calls.lock().unwrap().clone()
    }

    /// Queries passed to `search_users`
    pub fn search_calls(&self) -> Vec<String> {
        self.state.search_calls.lock().unwrap().clone()
    }

    /// Number of mutating calls (create, update, approvers)
    pub fn mutation_count(&self) -> usize {
        self.create_calls().len() + self.update_calls().len() + self.update_approvers_calls().len()
    }
}

#[async_trait]
impl ForgeClient for MockForge {
    async fn get_project(&self) -> Result<Project> {
        Ok(Project {
            id: 42,
            path_with_namespace: "group/project".to_string(),
            web_url: "https://gitlab.com/group/project".to_string(),
            default_branch: self.state.default_branch.lock().unwrap().clone(),
        })
    }

    async fn create_merge_request(&self, params: &CreateMrParams) -> Result<MergeRequest> {
        self.state.create_calls.lock().unwrap().push(params.clone());

        if let Some(failure) = self.state.error_on_create.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let iid = self.state.next_iid.fetch_add(1, Ordering::SeqCst);
        let mr = MergeRequest {
            iid,
            title: params.title.clone(),
            source_branch: params.source_branch.clone(),
            target_branch: params.target_branch.clone(),
            description: params.description.clone(),
            web_url: format!("https://gitlab.com/group/project/-/merge_requests/{iid}"),
            work_in_progress: params.title.starts_with("WIP:"),
            assignee: None,
            labels: params.labels.iter().cloned().collect(),
            updated_at: None,
        };
        self.state.mrs.lock().unwrap().push(mr.clone());
        Ok(mr)
    }

    async fn list_merge_requests(&self, state: MrState) -> Result<Vec<MergeRequest>> {
        self.state.list_calls.lock().unwrap().push(state);
        Ok(self.state.mrs.lock().unwrap().clone())
    }

    async fn update_merge_request(&self, iid: u64, update: &MrUpdate) -> Result<MergeRequest> {
        self.state
            .update_calls
            .lock()
            .unwrap()
            .push((iid, update.clone()));

        if let Some(failure) = self.state.error_on_update.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let users = self.state.users.lock().unwrap().clone();
        let mut mrs = self.state.mrs.lock().unwrap();
        let mr = mrs
            .iter_mut()
            .find(|mr| mr.iid == iid)
            .ok_or_else(|| Error::GitLabApi("404 Not found".to_string()))?;

        if let Some(title) = &update.title {
            mr.title.clone_from(title);
            mr.work_in_progress = title.starts_with("WIP:");
        }
        if let Some(assignee) = update.assignee_id {
            mr.assignee = assignee.and_then(|id| users.iter().find(|u| u.id == id).cloned());
        }
        Ok(mr.clone())
    }

    async fn get_approvals(&self, iid: u64) -> Result<ApprovalConfig> {
        self.state.get_approvals_calls.lock().unwrap().push(iid);
        Ok(self.state.approvals.lock().unwrap().clone())
    }

    async fn update_approvers(&self, iid: u64, update: &ApproverUpdate) -> Result<()> {
        self.state
            .update_approvers_calls
            .lock()
            .unwrap()
            .push((iid, update.clone()));

        if let Some(failure) = self.state.error_on_update_approvers.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<String>> {
        Ok(self.state.labels.lock().unwrap().clone())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.state.search_calls.lock().unwrap().push(query.to_string());
        let query = query.to_lowercase();
        Ok(self
            .state
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&query) || u.name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}
