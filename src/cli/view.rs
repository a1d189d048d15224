//! View command - pick a merge request and open it in the browser

use crate::cli::context::CommandContext;
use crate::cli::prompt::TerminalPrompter;
use gitlab_mr::error::Result;
use gitlab_mr::select::view_merge_request;
use std::path::Path;

/// Run the view command
#[allow(clippy::future_not_send)]
pub async fn run_view(path: &Path, remote: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let prompter = TerminalPrompter::new();
    view_merge_request(&ctx.lifecycle, &prompter, &ctx.basis_branch)
        .await
        .map(drop)
}
