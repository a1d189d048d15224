//! Editing a selected merge request
//!
//! Typed state machine: [`SelectedMr`] → [`ChosenEdit`] → [`EditOutcome`].
//! Exactly one action is applied per edit.

mod workflow;

pub use workflow::edit_merge_request;

use crate::error::{Error, Result};
use crate::lifecycle::MrLifecycle;
use crate::types::{ApproverUpdate, MergeRequest, MrUpdate};
use std::collections::BTreeSet;
use tracing::debug;

/// Title prefix marking a merge request as work in progress
pub const WIP_MARKER: &str = "WIP:";

/// Newer GitLab marker, recognized when removing WIP status
const DRAFT_MARKER: &str = "Draft:";

/// One edit to apply to a merge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Replace the title
    EditTitle(String),
    /// Add or remove the WIP marker
    ToggleWip,
    /// Set (`Some`) or clear (`None`) the assignee
    SetAssignee(Option<u64>),
    /// Add a user to the approvers, keeping existing ones
    AddApprover(u64),
}

impl std::fmt::Display for EditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditTitle(title) => write!(f, "edit title to \"{title}\""),
            Self::ToggleWip => write!(f, "toggle WIP"),
            Self::SetAssignee(Some(id)) => write!(f, "assign user {id}"),
            Self::SetAssignee(None) => write!(f, "remove assignee"),
            Self::AddApprover(id) => write!(f, "add approver {id}"),
        }
    }
}

/// Menu entries offered for an MR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChoice {
    /// Edit the title
    EditTitle,
    /// Set or remove WIP
    ToggleWip,
    /// Set or change the assignee
    EditAssignee,
    /// Clear the assignee
    RemoveAssignee,
    /// Add an approver
    AddApprover,
}

/// Menu entries with their labels, in display order
pub fn edit_choices(mr: &MergeRequest) -> Vec<(EditChoice, String)> {
    let assignee = mr.assignee.as_ref().map(|a| a.username.as_str());
    vec![
        (EditChoice::EditTitle, "Edit title".to_string()),
        (
            EditChoice::ToggleWip,
            if mr.work_in_progress {
                "Remove WIP"
            } else {
                "Set as WIP"
            }
            .to_string(),
        ),
        (
            EditChoice::EditAssignee,
            assignee.map_or_else(
                || "Set assignee".to_string(),
                |name| format!("Edit assignee ({name})"),
            ),
        ),
        (
            EditChoice::RemoveAssignee,
            assignee.map_or_else(
                || "Remove assignee".to_string(),
                |name| format!("Remove assignee ({name})"),
            ),
        ),
        (EditChoice::AddApprover, "Add approvers".to_string()),
    ]
}

/// Title after toggling the WIP marker.
///
/// Removing strips a leading `WIP:` (or `Draft:`) and the whitespace around
/// it; adding prepends `WIP: `. Toggling twice gives back the trimmed title.
pub fn toggle_wip_title(title: &str, work_in_progress: bool) -> String {
    let trimmed = title.trim();
    if work_in_progress {
        trimmed
            .strip_prefix(WIP_MARKER)
            .or_else(|| trimmed.strip_prefix(DRAFT_MARKER))
            .unwrap_or(trimmed)
            .trim()
            .to_string()
    } else {
        format!("{WIP_MARKER} {trimmed}")
    }
}

/// Approver ids after adding one; existing approvers are never dropped
pub fn merged_approver_ids(existing: &BTreeSet<u64>, new_approver: u64) -> Vec<u64> {
    let mut ids = existing.clone();
    ids.insert(new_approver);
    ids.into_iter().collect()
}

/// An MR picked from the forge list, before an action is chosen
#[derive(Debug, Clone)]
pub struct SelectedMr {
    mr: MergeRequest,
}

impl SelectedMr {
    /// Start editing `mr`
    pub const fn new(mr: MergeRequest) -> Self {
        Self { mr }
    }

    /// The selected MR
    pub const fn mr(&self) -> &MergeRequest {
        &self.mr
    }

    /// Choose the action to apply.
    ///
    /// Title edits must carry a non-empty title.
    pub fn choose(self, action: EditAction) -> Result<ChosenEdit> {
        let action = match action {
            EditAction::EditTitle(title) => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(Error::EmptyTitle);
                }
                EditAction::EditTitle(title.to_string())
            }
            other => other,
        };
        Ok(ChosenEdit {
            mr: self.mr,
            action,
        })
    }
}

/// An MR with the one action that will be applied to it
#[derive(Debug, Clone)]
pub struct ChosenEdit {
    mr: MergeRequest,
    action: EditAction,
}

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The forge accepted the change
    Applied {
        /// The MR as returned by the forge (unchanged MR for approver edits)
        mr: MergeRequest,
        /// The applied action
        action: EditAction,
    },
    /// The forge rejected the change; nothing was retried
    Failed {
        /// MR iid
        iid: u64,
        /// The attempted action
        action: EditAction,
        /// Forge message, verbatim
        message: String,
    },
}

impl EditOutcome {
    /// User-facing summary line
    pub fn summary(&self) -> String {
        match self {
            Self::Applied { mr, action } => {
                let iid = mr.iid;
                match action {
                    EditAction::EditTitle(_) => format!("MR !{iid} title updated."),
                    EditAction::ToggleWip => format!(
                        "MR !{iid} WIP {}.",
                        if mr.work_in_progress { "added" } else { "removed" }
                    ),
                    EditAction::SetAssignee(Some(id)) => format!(
                        "MR !{iid} assignee set to {}.",
                        mr.assignee
                            .as_ref()
                            .map_or_else(|| format!("user {id}"), |a| a.username.clone())
                    ),
                    EditAction::SetAssignee(None) => format!("MR !{iid} assignee removed."),
                    EditAction::AddApprover(_) => format!("MR !{iid} approver added."),
                }
            }
            Self::Failed { message, .. } => message.clone(),
        }
    }
}

impl ChosenEdit {
    /// The chosen action
    pub const fn action(&self) -> &EditAction {
        &self.action
    }

    /// The MR being edited
    pub const fn mr(&self) -> &MergeRequest {
        &self.mr
    }

    /// The patch this edit sends, for title and assignee actions
    pub fn update(&self) -> Option<MrUpdate> {
        match &self.action {
            EditAction::EditTitle(title) => Some(MrUpdate {
                title: Some(title.clone()),
                ..MrUpdate::default()
            }),
            EditAction::ToggleWip => Some(MrUpdate {
                title: Some(toggle_wip_title(&self.mr.title, self.mr.work_in_progress)),
                ..MrUpdate::default()
            }),
            EditAction::SetAssignee(assignee) => Some(MrUpdate {
                assignee_id: Some(*assignee),
                ..MrUpdate::default()
            }),
            EditAction::AddApprover(_) => None,
        }
    }

    /// Apply the edit against the forge.
    pub async fn apply(self, lifecycle: &MrLifecycle) -> EditOutcome {
        let iid = self.mr.iid;
        debug!(mr_iid = iid, action = %self.action, "applying edit");

        let result = match (&self.action, self.update()) {
            (_, Some(update)) => lifecycle.update(iid, &update).await,
            (EditAction::AddApprover(user_id), None) => {
                add_approver(lifecycle, iid, *user_id).await.map(|()| self.mr.clone())
            }
            (_, None) => Ok(self.mr.clone()),
        };

        match result {
            Ok(mr) => EditOutcome::Applied {
                mr,
                action: self.action,
            },
            Err(e) => {
                debug!(mr_iid = iid, error = %e, "edit failed");
                EditOutcome::Failed {
                    iid,
                    action: self.action,
                    message: e.to_string(),
                }
            }
        }
    }
}

async fn add_approver(lifecycle: &MrLifecycle, iid: u64, user_id: u64) -> Result<()> {
    let config = lifecycle.get_approval_config(iid).await?;
    let update = ApproverUpdate {
        approver_ids: merged_approver_ids(&config.approver_ids(), user_id),
        approver_group_ids: config.approver_group_ids().into_iter().collect(),
    };
    lifecycle.update_approvers(iid, &update).await
}
