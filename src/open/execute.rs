//! Branch plan execution - effectful operations
//!
//! Takes a `BranchPlan` (created by the pure planning functions) and runs it
//! against the working copy, one step at a time.

use crate::error::Result;
use crate::open::plan::{BranchPlan, BranchStep};
use crate::prompt::Prompter;
use crate::repo::VersionControl;
use tracing::debug;

/// Execute the branch plan (EFFECTFUL)
///
/// Steps run strictly in order; each depends on the index and branch state
/// the previous one left behind. The first failure stops execution and is
/// returned unchanged.
#[allow(clippy::future_not_send)]
pub async fn execute_branch_plan(
    plan: &BranchPlan,
    vcs: &dyn VersionControl,
    prompter: &dyn Prompter,
) -> Result<()> {
    for step in &plan.steps {
        debug!(%step, "executing branch step");
        prompter.status(&format!("Running: {step}"));

        match step {
            BranchStep::CreateBranch { name } => vcs.create_branch(name).await?,
            BranchStep::StageAll => vcs.add_all().await?,
            BranchStep::Commit { message } => vcs.commit(message).await?,
            BranchStep::Push { remote, branch } => vcs.push(remote, branch).await?,
        }
    }

    Ok(())
}
