//! Working-copy access
//!
//! `VersionControl` is the seam between the workflows and git. `GitCli` is
//! the production implementation; tests substitute a recording mock.

mod git;
mod inspect;
mod parse;

pub use git::GitCli;
pub use inspect::{classify, inspect};
pub use parse::{parse_branch_list, parse_porcelain_status, parse_remote_list};

use crate::error::Result;
use crate::types::{CheckoutArgs, GitRemote, WorkingCopyStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Git operations the workflows need
///
/// Every call is awaited to completion before the next one is issued; an
/// implementation never needs to guard against interleaving.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Current branch and changed paths grouped by kind
    async fn status(&self) -> Result<WorkingCopyStatus>;

    /// Local branches, name → commit id
    async fn list_branches(&self) -> Result<BTreeMap<String, String>>;

    /// Create a branch at HEAD and switch to it
    async fn create_branch(&self, name: &str) -> Result<()>;

    /// Switch branches
    async fn checkout(&self, args: &CheckoutArgs) -> Result<()>;

    /// Stage every change, including untracked files
    async fn add_all(&self) -> Result<()>;

    /// Commit the index
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push a branch and set it as upstream
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// Fetch a single branch from a remote
    async fn fetch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Configured remotes with their push URLs
    async fn list_remotes(&self) -> Result<Vec<GitRemote>>;

    /// Subject of the HEAD commit, if there is one
    async fn last_commit_message(&self) -> Result<Option<String>>;
}
