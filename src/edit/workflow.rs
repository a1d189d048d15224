//! Edit-MR workflow: select → choose action → apply → notify

use super::{EditAction, EditChoice, EditOutcome, SelectedMr, edit_choices};
use crate::error::Result;
use crate::lifecycle::MrLifecycle;
use crate::prompt::{Flow, Notice, Prompter};
use crate::select::select_merge_request;
use crate::types::User;

const SEARCH_AGAIN: &str = "Search again...";

/// Ask for a search term and let the user pick one of the matches.
///
/// Loops while the user picks "Search again...".
#[allow(clippy::future_not_send)]
async fn search_user(lifecycle: &MrLifecycle, prompter: &dyn Prompter) -> Result<Option<User>> {
    loop {
        let Some(query) = prompter
            .input("Search for user...", None)?
            .filter(|q| !q.trim().is_empty())
        else {
            return Ok(None);
        };

        let mut users = lifecycle.search_users(query.trim()).await?;
        let mut items: Vec<String> = users.iter().map(ToString::to_string).collect();
        items.push(SEARCH_AGAIN.to_string());

        match prompter.select("Select a user...", &items)? {
            None => return Ok(None),
            Some(index) if index < users.len() => return Ok(Some(users.swap_remove(index))),
            Some(_) => {}
        }
    }
}

/// Turn a menu choice into an action, prompting for whatever it needs.
#[allow(clippy::future_not_send)]
async fn gather_action(
    choice: EditChoice,
    current_title: &str,
    lifecycle: &MrLifecycle,
    prompter: &dyn Prompter,
) -> Result<Option<EditAction>> {
    Ok(match choice {
        EditChoice::EditTitle => prompter
            .input("Title", Some(current_title))?
            .filter(|t| !t.trim().is_empty())
            .map(EditAction::EditTitle),
        EditChoice::ToggleWip => Some(EditAction::ToggleWip),
        EditChoice::EditAssignee => search_user(lifecycle, prompter)
            .await?
            .map(|user| EditAction::SetAssignee(Some(user.id))),
        EditChoice::RemoveAssignee => Some(EditAction::SetAssignee(None)),
        EditChoice::AddApprover => search_user(lifecycle, prompter)
            .await?
            .map(|user| EditAction::AddApprover(user.id)),
    })
}

/// Pick an MR, pick one edit, and apply it.
///
/// Forge rejections come back as [`EditOutcome::Failed`] after being shown
/// to the user; they are not retried.
#[allow(clippy::future_not_send)]
pub async fn edit_merge_request(
    lifecycle: &MrLifecycle,
    prompter: &dyn Prompter,
    basis_branch: &str,
) -> Result<Flow<EditOutcome>> {
    let Flow::Completed(mr) = select_merge_request(lifecycle, prompter, basis_branch).await? else {
        return Ok(Flow::Cancelled);
    };

    let choices = edit_choices(&mr);
    let labels: Vec<String> = choices.iter().map(|(_, label)| label.clone()).collect();
    let Some(&(choice, _)) = prompter
        .select("Select an action...", &labels)?
        .and_then(|index| choices.get(index))
    else {
        return Ok(Flow::Cancelled);
    };

    let Some(action) = gather_action(choice, &mr.title, lifecycle, prompter).await? else {
        return Ok(Flow::Cancelled);
    };

    let outcome = SelectedMr::new(mr).choose(action)?.apply(lifecycle).await;

    let notice = match &outcome {
        EditOutcome::Applied { .. } => Notice::info(outcome.summary()),
        EditOutcome::Failed { .. } => Notice::error(outcome.summary()),
    };
    prompter.notify(&notice)?;

    Ok(Flow::Completed(outcome))
}
