//! Shared test helpers: mock collaborators and fixtures

#![allow(dead_code)]

mod mock_forge;
mod mock_prompter;
mod mock_vcs;

pub use mock_forge::{ForgeFailure, MockForge};
pub use mock_prompter::MockPrompter;
pub use mock_vcs::MockVcs;

use gitlab_mr::lifecycle::MrLifecycle;
use gitlab_mr::types::{MergeRequest, RemoteDescriptor, User, WebProtocol};
use std::collections::BTreeSet;

/// Descriptor for `git@gitlab.com:group/project.git`
pub fn gitlab_remote() -> RemoteDescriptor {
    RemoteDescriptor {
        repo_id: "group%2Fproject".to_string(),
        repo_host: "gitlab.com".to_string(),
        web_protocol: WebProtocol::Https,
        project_path: "group/project".to_string(),
    }
}

/// Lifecycle over a clone of `forge`, so the test keeps access to its records
pub fn lifecycle_for(forge: &MockForge) -> MrLifecycle {
    MrLifecycle::new(Box::new(forge.clone()), gitlab_remote())
}

/// Open MR from `source` into `main`
pub fn make_mr(iid: u64, title: &str, source: &str) -> MergeRequest {
    MergeRequest {
        iid,
        title: title.to_string(),
        source_branch: source.to_string(),
        target_branch: "main".to_string(),
        description: None,
        web_url: format!("https://gitlab.com/group/project/-/merge_requests/{iid}"),
        work_in_progress: title.starts_with("WIP:"),
        assignee: None,
        labels: BTreeSet::new(),
        updated_at: None,
    }
}

/// A user whose display name is the capitalized username
pub fn make_user(id: u64, username: &str) -> User {
    let mut name = username.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    User {
        id,
        username: username.to_string(),
        name,
    }
}
