//! Branch preparation planning - pure functions
//!
//! Turns the classified repository state and the user's inputs into the
//! ordered git steps that must run before a merge request can be opened.
//! No I/O happens here.

use crate::error::{Error, Result};
use crate::types::RepositoryState;

/// A single git step in a branch plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchStep {
    /// Create the branch at HEAD and switch to it
    CreateBranch {
        /// Branch name
        name: String,
    },
    /// Stage every change, including untracked files
    StageAll,
    /// Commit the staged changes
    Commit {
        /// Commit message
        message: String,
    },
    /// Push the branch and set its upstream
    Push {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
}

impl std::fmt::Display for BranchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateBranch { name } => write!(f, "create branch {name}"),
            Self::StageAll => write!(f, "stage all changes"),
            Self::Commit { message } => write!(f, "commit \"{message}\""),
            Self::Push { remote, branch } => write!(f, "push {branch} to {remote}"),
        }
    }
}

/// Ordered, strictly sequential git steps
///
/// Push is always last, Commit always follows StageAll, and CreateBranch
/// only appears when the working copy sits on the basis branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPlan {
    /// Steps in execution order
    pub steps: Vec<BranchStep>,
}

impl BranchPlan {
    /// Whether the plan creates a branch
    pub fn creates_branch(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, BranchStep::CreateBranch { .. }))
    }

    /// Whether the plan commits pending changes
    pub fn commits(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, BranchStep::Commit { .. }))
    }
}

/// Inputs to branch planning
#[derive(Debug, Clone)]
pub struct PlanInputs<'a> {
    /// Branch the MR will be opened from
    pub desired_branch: &'a str,
    /// Branch the MR will merge into
    pub mr_target_branch: &'a str,
    /// Branch the workflow treats as the repository's starting point
    pub basis_branch: &'a str,
    /// Remote to push to
    pub remote: &'a str,
    /// Message used if pending changes are committed
    pub commit_message: &'a str,
    /// Whether pending changes should be committed (false = declined)
    pub commit_changes: bool,
}

/// Validate the desired branch name before any git side effect.
///
/// The MR target and the basis branch are distinct concepts; the source
/// branch may equal neither.
pub fn validate_branch_name(
    desired_branch: &str,
    mr_target_branch: &str,
    basis_branch: &str,
) -> Result<()> {
    if desired_branch.is_empty() {
        return Err(Error::EmptyBranchName);
    }
    if desired_branch.chars().any(char::is_whitespace) {
        return Err(Error::InvalidBranchName(desired_branch.to_string()));
    }
    if desired_branch == mr_target_branch {
        return Err(Error::BranchEqualsTarget(mr_target_branch.to_string()));
    }
    if desired_branch == basis_branch {
        return Err(Error::BranchEqualsTarget(basis_branch.to_string()));
    }
    Ok(())
}

/// Off the basis branch nothing is created, so the desired branch must be
/// the one checked out. A detached HEAD never matches.
pub fn check_source_checked_out(state: &RepositoryState, desired_branch: &str) -> Result<()> {
    if state.is_on_target_branch || state.current_branch == desired_branch {
        return Ok(());
    }
    Err(Error::BranchNotCheckedOut {
        branch: desired_branch.to_string(),
        current: state.current_branch.clone(),
    })
}

/// Create a branch plan (PURE - no I/O, easily testable)
///
/// | on basis | clean or declined | plan                                  |
/// |----------|-------------------|---------------------------------------|
/// | yes      | yes               | CreateBranch, Push                    |
/// | yes      | no                | CreateBranch, StageAll, Commit, Push  |
/// | no       | yes               | Push                                  |
/// | no       | no                | StageAll, Commit, Push                |
pub fn plan_branch_preparation(
    state: &RepositoryState,
    inputs: &PlanInputs<'_>,
) -> Result<BranchPlan> {
    validate_branch_name(
        inputs.desired_branch,
        inputs.mr_target_branch,
        inputs.basis_branch,
    )?;

    if state.has_conflicts {
        return Err(Error::UnresolvedConflicts(Vec::new()));
    }
    check_source_checked_out(state, inputs.desired_branch)?;

    let commit = !state.is_clean && inputs.commit_changes;
    if commit && inputs.commit_message.trim().is_empty() {
        return Err(Error::EmptyCommitMessage);
    }

    let mut steps = Vec::with_capacity(4);

    if state.is_on_target_branch {
        steps.push(BranchStep::CreateBranch {
            name: inputs.desired_branch.to_string(),
        });
    }

    if commit {
        steps.push(BranchStep::StageAll);
        steps.push(BranchStep::Commit {
            message: inputs.commit_message.to_string(),
        });
    }

    steps.push(BranchStep::Push {
        remote: inputs.remote.to_string(),
        branch: inputs.desired_branch.to_string(),
    });

    Ok(BranchPlan { steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(on_basis: bool, clean: bool) -> RepositoryState {
        RepositoryState {
            current_branch: if on_basis { "main" } else { "feature" }.to_string(),
            is_on_target_branch: on_basis,
            is_clean: clean,
            has_conflicts: false,
        }
    }

    fn inputs(commit_changes: bool) -> PlanInputs<'static> {
        PlanInputs {
            desired_branch: "feature",
            mr_target_branch: "main",
            basis_branch: "main",
            remote: "origin",
            commit_message: "Add feature",
            commit_changes,
        }
    }

    #[test]
    fn test_empty_commit_message_fine_when_clean() {
        let mut inputs = inputs(true);
        inputs.commit_message = "";
        assert!(plan_branch_preparation(&state(false, true), &inputs).is_ok());
    }

    #[test]
    fn test_branch_equal_to_basis_rejected() {
        match validate_branch_name("develop", "main", "develop") {
            Err(Error::BranchEqualsTarget(name)) => assert_eq!(name, "develop"),
            other => panic!("Expected BranchEqualsTarget error, got: {other:?}"),
        }
    }

    #[test]
    fn test_tab_counts_as_whitespace() {
        assert!(matches!(
            validate_branch_name("a\tb", "main", "main"),
            Err(Error::InvalidBranchName(_))
        ));
    }

    #[test]
    fn test_other_checked_out_branch_rejected() {
        let mut on_other = state(false, false);
        on_other.current_branch = "other".to_string();
        match plan_branch_preparation(&on_other, &inputs(true)) {
            Err(Error::BranchNotCheckedOut { branch, current }) => {
                assert_eq!(branch, "feature");
                assert_eq!(current, "other");
            }
            other => panic!("Expected BranchNotCheckedOut error, got: {other:?}"),
        }
    }

    #[test]
    fn test_detached_head_never_matches() {
        let mut detached = state(false, true);
        detached.current_branch = "HEAD".to_string();
        assert!(matches!(
            check_source_checked_out(&detached, "feature"),
            Err(Error::BranchNotCheckedOut { .. })
        ));
    }

    #[test]
    fn test_any_branch_allowed_from_basis() {
        assert!(check_source_checked_out(&state(true, true), "anything").is_ok());
    }
}
