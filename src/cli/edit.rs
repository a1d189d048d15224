//! Edit command - change the title, WIP status, assignee, or approvers of an MR

use crate::cli::context::CommandContext;
use crate::cli::prompt::TerminalPrompter;
use gitlab_mr::edit::{EditOutcome, edit_merge_request};
use gitlab_mr::error::{Error, Result};
use gitlab_mr::prompt::Flow;
use std::path::Path;

/// Run the edit command
///
/// A rejected edit has already been shown to the user; it still makes the
/// command fail.
#[allow(clippy::future_not_send)]
pub async fn run_edit(path: &Path, remote: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let prompter = TerminalPrompter::new();

    match edit_merge_request(&ctx.lifecycle, &prompter, &ctx.basis_branch).await? {
        Flow::Completed(EditOutcome::Failed { iid, action, .. }) => Err(Error::GitLabApi(format!(
            "Failed to {action} on MR !{iid}."
        ))),
        Flow::Completed(EditOutcome::Applied { .. }) | Flow::Cancelled => Ok(()),
    }
}
