//! Labels and users commands - look up project labels and GitLab users

use crate::cli::context::CommandContext;
use crate::cli::style::Stylize;
use anstream::println;
use gitlab_mr::error::Result;
use std::path::Path;

/// Run the labels command
pub async fn run_labels(path: &Path, remote: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let labels = ctx.lifecycle.list_labels().await?;
    if labels.is_empty() {
        println!("{}", "No labels.".muted());
    }
    for label in labels {
        println!("{label}");
    }
    Ok(())
}

/// Run the users command
pub async fn run_users(path: &Path, remote: Option<&str>, query: &str) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;
    let users = ctx.lifecycle.search_users(query).await?;
    if users.is_empty() {
        println!("{}", format!("No users matching '{query}'.").muted());
    }
    for user in users {
        println!("{} {}", user.username.accent(), user.name.muted());
    }
    Ok(())
}
