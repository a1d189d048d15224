//! Repository state classification

use super::VersionControl;
use crate::error::{Error, Result};
use crate::types::{RepositoryState, WorkingCopyStatus};
use tracing::debug;

/// Classify a raw status against the basis branch (pure).
///
/// Conflicted paths are a fatal precondition: they are never planned around.
pub fn classify(status: &WorkingCopyStatus, basis_branch: &str) -> Result<RepositoryState> {
    if !status.conflicted.is_empty() {
        return Err(Error::UnresolvedConflicts(status.conflicted.clone()));
    }

    let is_clean = status.created.is_empty()
        && status.deleted.is_empty()
        && status.modified.is_empty()
        && status.not_added.is_empty()
        && status.renamed.is_empty();

    let current_branch = status.current.clone().unwrap_or_else(|| "HEAD".to_string());
    let is_on_target_branch = status.current.as_deref() == Some(basis_branch);

    Ok(RepositoryState {
        current_branch,
        is_on_target_branch,
        is_clean,
        has_conflicts: false,
    })
}

/// Query the working copy and classify it.
pub async fn inspect(vcs: &dyn VersionControl, basis_branch: &str) -> Result<RepositoryState> {
    let status = vcs.status().await?;
    let state = classify(&status, basis_branch)?;
    debug!(
        current = %state.current_branch,
        on_basis = state.is_on_target_branch,
        clean = state.is_clean,
        "inspected working copy"
    );
    Ok(state)
}
