//! Open-MR workflow
//!
//! validate → inspect → commit decision → plan → execute → create → notify

use crate::config::Preferences;
use crate::error::{Error, Result};
use crate::lifecycle::MrLifecycle;
use crate::open::execute::execute_branch_plan;
use crate::open::plan::{
    PlanInputs, check_source_checked_out, plan_branch_preparation, validate_branch_name,
};
use crate::prompt::{Flow, Notice, Prompter};
use crate::repo::{VersionControl, inspect};
use crate::types::{CreateMrParams, MergeRequest, RepositoryState};
use tracing::debug;

/// Already-validated form values for a new merge request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenRequest {
    /// Branch the MR is opened from
    pub branch: String,
    /// Branch the MR merges into
    pub target_branch: String,
    /// MR title, also the commit message for pending changes
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

impl OpenRequest {
    fn create_params(&self) -> CreateMrParams {
        CreateMrParams {
            source_branch: self.branch.clone(),
            target_branch: self.target_branch.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            remove_source_branch: self.remove_source_branch,
            squash: self.squash,
            assignee_ids: self.assignee_ids.clone(),
            labels: self.labels.clone(),
        }
    }
}

/// How MR creation ended once the branch was pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The MR was created
    Created {
        /// The new MR
        mr: MergeRequest,
        /// URL offered to the user (edit page when configured)
        url: String,
    },
    /// An open MR already exists for the branch
    Duplicate {
        /// iid of the existing MR
        iid: u64,
        /// Web URL of the existing MR
        url: String,
        /// Forge message, verbatim
        message: String,
    },
    /// Creation failed; the web form is offered instead
    CreateFailed {
        /// Failure message, verbatim
        message: String,
        /// Web form for creating the MR by hand
        fallback_url: String,
    },
}

const COMMIT_PROMPT: &str = "Commit current changes?";
const OPEN_MR_ACTION: &str = "Open MR";
const OPEN_EXISTING_ACTION: &str = "Open existing MR on GitLab";
const CREATE_ON_FORGE_ACTION: &str = "Create on GitLab";

/// Decide whether pending changes get committed.
///
/// `None` means the user dismissed the question.
fn decide_commit(
    state: &RepositoryState,
    prefs: &Preferences,
    prompter: &dyn Prompter,
) -> Result<Option<bool>> {
    if state.is_clean || prefs.auto_commit_changes {
        return Ok(Some(true));
    }
    let choices = ["Yes".to_string(), "No".to_string()];
    Ok(prompter
        .select(COMMIT_PROMPT, &choices)?
        .map(|index| index == 0))
}

/// Open a merge request from the working copy.
///
/// Validation and precondition failures return `Err` before any git side
/// effect. Git failures while preparing the branch are returned unchanged.
/// Failures of the create call itself are reported through the prompter
/// with a recovery action and returned as an [`OpenOutcome`].
#[allow(clippy::future_not_send)]
pub async fn open_merge_request(
    request: &OpenRequest,
    prefs: &Preferences,
    basis_branch: &str,
    vcs: &dyn VersionControl,
    lifecycle: &MrLifecycle,
    prompter: &dyn Prompter,
) -> Result<Flow<OpenOutcome>> {
    validate_branch_name(&request.branch, &request.target_branch, basis_branch)?;

    let state = inspect(vcs, basis_branch).await?;
    check_source_checked_out(&state, &request.branch)?;

    let Some(commit_changes) = decide_commit(&state, prefs, prompter)? else {
        debug!("commit prompt dismissed");
        return Ok(Flow::Cancelled);
    };

    let plan = plan_branch_preparation(
        &state,
        &PlanInputs {
            desired_branch: &request.branch,
            mr_target_branch: &request.target_branch,
            basis_branch,
            remote: &prefs.target_remote,
            commit_message: &request.title,
            commit_changes,
        },
    )?;
    debug!(steps = plan.steps.len(), "planned branch preparation");

    prompter.status(&format!(
        "Building MR to {} from {}...",
        request.target_branch, request.branch
    ));
    execute_branch_plan(&plan, vcs, prompter).await?;

    let outcome = match lifecycle.create(&request.create_params()).await {
        Ok(mr) => {
            let url = if prefs.open_to_edit {
                format!("{}/edit", mr.web_url)
            } else {
                mr.web_url.clone()
            };
            let message = format!("MR !{} created.", mr.iid);

            if prefs.auto_open_mr {
                prompter.open_url(&url)?;
                prompter.notify(&Notice::info(message))?;
            } else if prompter.notify(&Notice::info(message).with_action(OPEN_MR_ACTION))? {
                prompter.open_url(&url)?;
            }
            OpenOutcome::Created { mr, url }
        }
        Err(Error::DuplicateMergeRequest {
            iid: Some(iid),
            message,
        }) => {
            let url = lifecycle.build_existing_mr_url(iid);
            if prompter.notify(&Notice::error(message.clone()).with_action(OPEN_EXISTING_ACTION))? {
                prompter.open_url(&url)?;
            }
            OpenOutcome::Duplicate { iid, url, message }
        }
        Err(e) => {
            let message = e.to_string();
            let fallback_url = lifecycle.build_create_url(&request.branch, &request.target_branch);
            if prompter.notify(&Notice::error(message.clone()).with_action(CREATE_ON_FORGE_ACTION))?
            {
                prompter.open_url(&fallback_url)?;
            }
            OpenOutcome::CreateFailed {
                message,
                fallback_url,
            }
        }
    };

    Ok(Flow::Completed(outcome))
}
