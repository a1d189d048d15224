//! List command - print merge requests of the project

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, hyperlink};
use anstream::println;
use gitlab_mr::error::{Error, Result};
use gitlab_mr::types::{MergeRequest, MrState};
use std::path::Path;

fn print_mr(mr: &MergeRequest, basis_branch: &str) {
    let reference = format!("!{}", mr.iid);
    let mut branches = mr.source_branch.clone();
    if mr.target_branch != basis_branch {
        branches.push_str(" > ");
        branches.push_str(&mr.target_branch);
    }

    let mut line = format!(
        "{} {} {}",
        hyperlink(&reference, &mr.web_url).accent(),
        mr.title,
        format!("[{branches}]").muted()
    );
    if let Some(assignee) = &mr.assignee {
        line.push_str(&format!(" {}", format!("@{}", assignee.username).muted()));
    }
    if !mr.labels.is_empty() {
        let labels: Vec<&str> = mr.labels.iter().map(String::as_str).collect();
        line.push_str(&format!(" {}", labels.join(", ").muted()));
    }
    println!("{line}");
}

/// Run the list command
pub async fn run_list(path: &Path, remote: Option<&str>, state: MrState) -> Result<()> {
    let ctx = CommandContext::new(path, remote).await?;

    let mrs = match ctx.lifecycle.list_in_state(state).await {
        Ok(mrs) => mrs,
        Err(Error::NoMergeRequestsFound) => {
            println!("{}", "No merge requests.".muted());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    for mr in &mrs {
        print_mr(mr, &ctx.basis_branch);
    }
    Ok(())
}
