//! Open command - push the working copy and open a merge request

use crate::cli::context::CommandContext;
use crate::cli::prompt::TerminalPrompter;
use crate::cli::style::Stylize;
use anstream::println;
use gitlab_mr::config::{load_preferences, save_preferences};
use gitlab_mr::error::Result;
use gitlab_mr::open::{OpenOutcome, OpenRequest, open_merge_request};
use gitlab_mr::prompt::{Flow, Prompter};
use gitlab_mr::repo::VersionControl;
use std::path::Path;
use tracing::debug;

/// Options for the open command
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Source branch; prompted when absent
    pub branch: Option<String>,
    /// Target branch; defaults to the basis branch
    pub target: Option<String>,
    /// Title; prompted when absent, defaulting to the last commit subject
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Delete the source branch once merged; `None` defers to the preference
    pub remove_source_branch: Option<bool>,
    /// Squash commits when merging
    pub squash: bool,
    /// Usernames to assign
    pub assignees: Vec<String>,
    /// Labels to apply
    pub labels: Vec<String>,
}

/// Run the open command
#[allow(clippy::future_not_send)]
pub async fn run_open(path: &Path, remote: Option<&str>, options: OpenOptions) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let prompter = TerminalPrompter::new();

    let target_branch = options
        .target
        .unwrap_or_else(|| ctx.basis_branch.clone());

    let branch = match options.branch {
        Some(branch) => branch,
        None => {
            let current = ctx.repo.status().await?.current;
            let default = current.filter(|c| *c != ctx.basis_branch && *c != target_branch);
            match prompter.input("Branch", default.as_deref())? {
                Some(branch) => branch,
                None => return cancelled(),
            }
        }
    };

    let title = match options.title {
        Some(title) => title,
        None => {
            let last_commit = ctx.repo.last_commit_message().await?;
            match prompter.input("Title", last_commit.as_deref())? {
                Some(title) => title,
                None => return cancelled(),
            }
        }
    };

    let mut assignee_ids = Vec::with_capacity(options.assignees.len());
    for username in &options.assignees {
        assignee_ids.push(ctx.lifecycle.find_user(username).await?.id);
    }

    let request = OpenRequest {
        branch,
        target_branch,
        title,
        description: options.description,
        remove_source_branch: options
            .remove_source_branch
            .unwrap_or(ctx.prefs.remove_source_branch),
        squash: options.squash,
        assignee_ids,
        labels: options.labels,
    };

    let flow = open_merge_request(
        &request,
        &ctx.prefs,
        &ctx.basis_branch,
        &ctx.repo,
        &ctx.lifecycle,
        &prompter,
    )
    .await?;

    match flow {
        Flow::Completed(OpenOutcome::Created { .. }) => {
            // Re-read so flag and environment overrides stay out of the file
            if ctx.prefs.target_branch.as_deref() != Some(request.target_branch.as_str()) {
                debug!(target = %request.target_branch, "saving target branch");
                let mut stored = load_preferences(&ctx.config_path)?;
                stored.target_branch = Some(request.target_branch);
                save_preferences(&ctx.config_path, &stored)?;
            }
        }
        Flow::Completed(_) => {}
        Flow::Cancelled => return cancelled(),
    }

    Ok(())
}

fn cancelled() -> Result<()> {
    println!("{}", "Cancelled".muted());
    Ok(())
}
