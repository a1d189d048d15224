//! Checking out a merge request's source branch
//!
//! Planning is pure; execution switches to an existing local branch or
//! fetches exactly one branch and tracks it. No other branch is created.

use crate::error::Result;
use crate::lifecycle::MrLifecycle;
use crate::prompt::{Flow, Prompter};
use crate::repo::VersionControl;
use crate::select::select_merge_request;
use crate::types::{CheckoutArgs, MergeRequest};
use std::collections::BTreeMap;
use tracing::debug;

/// What checking out an MR requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    /// The source branch exists locally
    SwitchTo(String),
    /// Fetch the source branch and create a local tracking branch of the same name
    FetchThenTrack {
        /// Remote to fetch from
        remote: String,
        /// Branch name, local and remote
        branch: String,
    },
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SwitchTo(branch) => write!(f, "switch to {branch}"),
            Self::FetchThenTrack { remote, branch } => {
                write!(f, "fetch {branch} from {remote} and track {remote}/{branch}")
            }
        }
    }
}

/// Decide how to check out an MR (pure).
pub fn plan_checkout<V>(
    mr: &MergeRequest,
    local_branches: &BTreeMap<String, V>,
    remote_name: &str,
) -> CheckoutStep {
    if local_branches.contains_key(&mr.source_branch) {
        CheckoutStep::SwitchTo(mr.source_branch.clone())
    } else {
        CheckoutStep::FetchThenTrack {
            remote: remote_name.to_string(),
            branch: mr.source_branch.clone(),
        }
    }
}

/// Run a checkout step.
pub async fn execute_checkout(step: &CheckoutStep, vcs: &dyn VersionControl) -> Result<()> {
    debug!(%step, "executing checkout");
    match step {
        CheckoutStep::SwitchTo(branch) => vcs.checkout(&CheckoutArgs::Existing(branch.clone())).await,
        CheckoutStep::FetchThenTrack { remote, branch } => {
            vcs.fetch(remote, branch).await?;
            vcs.checkout(&CheckoutArgs::Track {
                branch: branch.clone(),
                upstream: format!("{remote}/{branch}"),
            })
            .await
        }
    }
}

/// Pick an MR and check out its source branch.
#[allow(clippy::future_not_send)]
pub async fn checkout_merge_request(
    lifecycle: &MrLifecycle,
    vcs: &dyn VersionControl,
    prompter: &dyn Prompter,
    remote_name: &str,
    basis_branch: &str,
) -> Result<Flow<CheckoutStep>> {
    let Flow::Completed(mr) = select_merge_request(lifecycle, prompter, basis_branch).await? else {
        return Ok(Flow::Cancelled);
    };

    prompter.status(&format!("Checking out MR !{}...", mr.iid));

    let branches = vcs.list_branches().await?;
    let step = plan_checkout(&mr, &branches, remote_name);
    execute_checkout(&step, vcs).await?;

    prompter.status(&format!("Switched to MR !{}.", mr.iid));
    Ok(Flow::Completed(step))
}
