//! Picking a merge request from the forge's open list

use crate::error::{Error, Result};
use crate::lifecycle::MrLifecycle;
use crate::prompt::{Flow, Notice, Prompter};
use crate::types::MergeRequest;
use tracing::debug;

/// One-line label for an MR in a selection list.
///
/// The target branch is only shown when it differs from the basis branch.
pub fn mr_choice_label(mr: &MergeRequest, basis_branch: &str) -> String {
    let mut label = format!("MR !{}: {} [{}", mr.iid, mr.title, mr.source_branch);
    if mr.target_branch != basis_branch {
        label.push_str(" > ");
        label.push_str(&mr.target_branch);
    }
    label.push(']');
    label
}

/// List open MRs and let the user pick one.
///
/// An empty list is reported as a notice and ends the flow; it is not an error.
#[allow(clippy::future_not_send)]
pub async fn select_merge_request(
    lifecycle: &MrLifecycle,
    prompter: &dyn Prompter,
    basis_branch: &str,
) -> Result<Flow<MergeRequest>> {
    let mut mrs = match lifecycle.list().await {
        Ok(mrs) => mrs,
        Err(Error::NoMergeRequestsFound) => {
            debug!("no open MRs");
            prompter.notify(&Notice::info("No open merge requests."))?;
            return Ok(Flow::Cancelled);
        }
        Err(e) => return Err(e),
    };

    let labels: Vec<String> = mrs
        .iter()
        .map(|mr| mr_choice_label(mr, basis_branch))
        .collect();

    match prompter.select("Select MR", &labels)? {
        Some(index) if index < mrs.len() => Ok(Flow::Completed(mrs.swap_remove(index))),
        _ => Ok(Flow::Cancelled),
    }
}

/// Pick an MR and open it in the browser.
#[allow(clippy::future_not_send)]
pub async fn view_merge_request(
    lifecycle: &MrLifecycle,
    prompter: &dyn Prompter,
    basis_branch: &str,
) -> Result<Flow<MergeRequest>> {
    let Flow::Completed(mr) = select_merge_request(lifecycle, prompter, basis_branch).await? else {
        return Ok(Flow::Cancelled);
    };
    prompter.open_url(&mr.web_url)?;
    Ok(Flow::Completed(mr))
}
