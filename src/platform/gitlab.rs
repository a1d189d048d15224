//! GitLab REST API client

use crate::error::{Error, Result};
use crate::platform::ForgeClient;
use crate::types::{
    ApprovalConfig, ApproverUpdate, CreateMrParams, Group, MergeRequest, MrState, MrUpdate,
    Project, RemoteDescriptor, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_url: String,
    project_id: String,
}

#[derive(Deserialize)]
struct GlMergeRequest {
    iid: u64,
    title: String,
    source_branch: String,
    target_branch: String,
    description: Option<String>,
    web_url: String,
    // Older instances only send `work_in_progress`, newer ones only `draft`
    #[serde(default)]
    work_in_progress: bool,
    #[serde(default)]
    draft: bool,
    assignee: Option<User>,
    #[serde(default)]
    labels: Vec<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<GlMergeRequest> for MergeRequest {
    fn from(mr: GlMergeRequest) -> Self {
        Self {
            iid: mr.iid,
            title: mr.title,
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            description: mr.description,
            web_url: mr.web_url,
            work_in_progress: mr.work_in_progress || mr.draft,
            assignee: mr.assignee,
            labels: mr.labels.into_iter().collect(),
            updated_at: mr.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct GlApprover {
    user: User,
}

#[derive(Deserialize)]
struct GlApproverGroup {
    group: Group,
}

#[derive(Deserialize)]
struct GlApprovals {
    #[serde(default)]
    approvers: Vec<GlApprover>,
    #[serde(default)]
    approver_groups: Vec<GlApproverGroup>,
}

#[derive(Deserialize)]
struct GlLabel {
    name: String,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    remove_source_branch: bool,
    squash: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignee_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<String>,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for list endpoints
const PER_PAGE: &str = "100";

/// Pull a human-readable message out of a GitLab error body.
///
/// GitLab uses `{"message": "..."}`, `{"message": ["..."]}`,
/// `{"message": {"field": ["..."]}}` or `{"error": "..."}`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let field = value.get("message").or_else(|| value.get("error"))?;

    let message = match field {
        Value::String(s) => s.clone(),
        Value::Array(items) => join_messages(items),
        Value::Object(fields) => fields
            .iter()
            .map(|(name, reasons)| match reasons {
                Value::Array(items) => format!("{name} {}", join_messages(items)),
                other => format!("{name} {}", value_text(other)),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => value_text(other),
    };

    Some(message).filter(|m| !m.is_empty())
}

fn join_messages(items: &[Value]) -> String {
    items.iter().map(value_text).collect::<Vec<_>>().join("; ")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl GitLabService {
    /// Create a new GitLab service for one project.
    ///
    /// `api_url` is the instance base URL (e.g., `https://gitlab.com`);
    /// `project_id` is the URL-encoded project path or numeric id.
    pub fn new(api_url: &str, token: String, project_id: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
            project_id,
        })
    }

    /// Create a service for the project a remote points at
    pub fn for_remote(remote: &RemoteDescriptor, token: String) -> Result<Self> {
        Self::new(&remote.api_base_url(), token, remote.repo_id.clone())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.api_url, path)
    }

    fn project_url(&self, path: &str) -> String {
        self.api_url(&format!("/projects/{}{}", self.project_id, path))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("PRIVATE-TOKEN", &self.token)
    }

    /// Turn a non-success response into the matching error
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("GitLab API request failed with status {status}"));
        debug!(%status, %message, "GitLab API error");

        if status == StatusCode::CONFLICT {
            Err(Error::Conflict(message))
        } else {
            Err(Error::GitLabApi(message))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::check(self.authed(request).send().await?).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ForgeClient for GitLabService {
    async fn get_project(&self) -> Result<Project> {
        debug!(project = %self.project_id, "getting project");
        let url = self.project_url("");
        self.send_json(self.client.get(&url)).await
    }

    async fn create_merge_request(&self, params: &CreateMrParams) -> Result<MergeRequest> {
        debug!(
            source = %params.source_branch,
            target = %params.target_branch,
            squash = params.squash,
            "creating MR"
        );
        let url = self.project_url("/merge_requests");

        let payload = CreateMrPayload {
            source_branch: &params.source_branch,
            target_branch: &params.target_branch,
            title: &params.title,
            description: params.description.as_deref().filter(|d| !d.is_empty()),
            remove_source_branch: params.remove_source_branch,
            squash: params.squash,
            assignee_ids: params.assignee_ids.clone(),
            labels: (!params.labels.is_empty()).then(|| params.labels.join(",")),
        };

        let mr: GlMergeRequest = self.send_json(self.client.post(&url).json(&payload)).await?;
        let mr: MergeRequest = mr.into();
        debug!(mr_iid = mr.iid, "created MR");
        Ok(mr)
    }

    async fn list_merge_requests(&self, state: MrState) -> Result<Vec<MergeRequest>> {
        debug!(state = state.as_query(), "listing MRs");
        let url = self.project_url("/merge_requests");

        let mrs: Vec<GlMergeRequest> = self
            .send_json(
                self.client
                    .get(&url)
                    .query(&[("state", state.as_query()), ("per_page", PER_PAGE)]),
            )
            .await?;

        debug!(count = mrs.len(), "listed MRs");
        Ok(mrs.into_iter().map(Into::into).collect())
    }

    async fn update_merge_request(&self, iid: u64, update: &MrUpdate) -> Result<MergeRequest> {
        debug!(mr_iid = iid, ?update, "updating MR");
        let url = self.project_url(&format!("/merge_requests/{iid}"));

        let mr: GlMergeRequest = self.send_json(self.client.put(&url).json(update)).await?;
        debug!(mr_iid = iid, "updated MR");
        Ok(mr.into())
    }

    async fn get_approvals(&self, iid: u64) -> Result<ApprovalConfig> {
        debug!(mr_iid = iid, "getting approvals");
        let url = self.project_url(&format!("/merge_requests/{iid}/approvals"));

        let approvals: GlApprovals = self.send_json(self.client.get(&url)).await?;
        Ok(ApprovalConfig {
            approvers: approvals.approvers.into_iter().map(|a| a.user).collect(),
            approver_groups: approvals
                .approver_groups
                .into_iter()
                .map(|g| g.group)
                .collect(),
        })
    }

    async fn update_approvers(&self, iid: u64, update: &ApproverUpdate) -> Result<()> {
        debug!(
            mr_iid = iid,
            approvers = ?update.approver_ids,
            groups = ?update.approver_group_ids,
            "updating approvers"
        );
        let url = self.project_url(&format!("/merge_requests/{iid}/approvers"));

        Self::check(self.authed(self.client.put(&url).json(update)).send().await?).await?;
        debug!(mr_iid = iid, "updated approvers");
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<String>> {
        debug!("listing labels");
        let url = self.project_url("/labels");

        let labels: Vec<GlLabel> = self
            .send_json(self.client.get(&url).query(&[("per_page", PER_PAGE)]))
            .await?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        debug!(query, "searching users");
        let url = self.api_url("/users");

        let users: Vec<User> = self
            .send_json(self.client.get(&url).query(&[("search", query)]))
            .await?;
        debug!(count = users.len(), "found users");
        Ok(users)
    }
}
