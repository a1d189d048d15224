//! Checkout command - switch to the source branch of a merge request

use crate::cli::context::CommandContext;
use crate::cli::prompt::TerminalPrompter;
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use gitlab_mr::checkout::checkout_merge_request;
use gitlab_mr::error::Result;
use gitlab_mr::prompt::Flow;
use std::path::Path;

/// Run the checkout command
#[allow(clippy::future_not_send)]
pub async fn run_checkout(path: &Path, remote: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let prompter = TerminalPrompter::new();

    let flow = checkout_merge_request(
        &ctx.lifecycle,
        &ctx.repo,
        &prompter,
        &ctx.remote_name,
        &ctx.basis_branch,
    )
    .await?;

    prompter.finish();
    if let Flow::Completed(step) = flow {
        println!("  {} {}", arrow(), step.to_string().muted());
    }
    Ok(())
}
