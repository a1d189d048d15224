//! Mock working copy for testing

use async_trait::async_trait;
use gitlab_mr::error::{Error, Result};
use gitlab_mr::repo::VersionControl;
use gitlab_mr::types::{CheckoutArgs, GitRemote, WorkingCopyStatus};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Mock `VersionControl`
///
/// Records every call as a short string (e.g., `"push origin feature"`) and
/// can fail any operation by name.
pub struct MockVcs {
    status: Mutex<WorkingCopyStatus>,
    branches: Mutex<BTreeMap<String, String>>,
    remotes: Mutex<Vec<GitRemote>>,
    last_commit: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
    failing_op: Mutex<Option<(String, String)>>,
}

impl MockVcs {
    /// Clean working copy on `branch` with an `origin` remote on gitlab.com
    pub fn on_branch(branch: &str) -> Self {
        Self {
            status: Mutex::new(WorkingCopyStatus {
                current: Some(branch.to_string()),
                ..WorkingCopyStatus::default()
            }),
            branches: Mutex::new(BTreeMap::from([(branch.to_string(), "abc123".to_string())])),
            remotes: Mutex::new(vec![GitRemote {
                name: "origin".to_string(),
                push_url: "git@gitlab.com:group/project.git".to_string(),
            }]),
            last_commit: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            failing_op: Mutex::new(None),
        }
    }

    /// Detach HEAD (no current branch)
    pub fn detached(self) -> Self {
        self.status.lock().unwrap().current = None;
        self
    }

    /// Mark the working copy dirty with one modified file
    pub fn with_modified(self, path: &str) -> Self {
        self.status.lock().unwrap().modified.push(path.to_string());
        self
    }

    /// Mark paths as conflicted
    pub fn with_conflicts(self, paths: &[&str]) -> Self {
        self.status
            .lock()
            .unwrap()
            .conflicted
            .extend(paths.iter().map(ToString::to_string));
        self
    }

    /// Add a local branch
    pub fn with_branch(self, name: &str) -> Self {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), "def456".to_string());
        self
    }

    /// Replace the remotes
    pub fn with_remotes(self, remotes: &[(&str, &str)]) -> Self {
        *self.remotes.lock().unwrap() = remotes
            .iter()
            .map(|(name, url)| GitRemote {
                name: (*name).to_string(),
                push_url: (*url).to_string(),
            })
            .collect();
        self
    }

    /// Make the operation named `op` (e.g., `"push"`) fail with `message`
    pub fn fail_on(&self, op: &str, message: &str) {
        *self.failing_op.lock().unwrap() = Some((op.to_string(), message.to_string()));
    }

    /// Every recorded call, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls that change the working copy or the remote
    pub fn mutating_calls(&self) -> Vec<String> {
        const READS: [&str; 4] = ["status", "list_branches", "list_remotes", "last_commit_message"];
        self.calls()
            .into_iter()
            .filter(|c| !READS.iter().any(|r| c == r))
            .collect()
    }

    fn record(&self, op: &str, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failing_op.lock().unwrap().as_ref() {
            Some((failing, message)) if failing == op => Err(Error::Git(message.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VersionControl for MockVcs {
    async fn status(&self) -> Result<WorkingCopyStatus> {
        self.record("status", "status".to_string())?;
        Ok(self.status.lock().unwrap().clone())
    }

    async fn list_branches(&self) -> Result<BTreeMap<String, String>> {
        self.record("list_branches", "list_branches".to_string())?;
        Ok(self.branches.lock().unwrap().clone())
    }

    async fn create_branch(&self, name: &str) -> Result<()> {
        self.record("create_branch", format!("create_branch {name}"))?;
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), "abc123".to_string());
        self.status.lock().unwrap().current = Some(name.to_string());
        Ok(())
    }

    async fn checkout(&self, args: &CheckoutArgs) -> Result<()> {
        let call = match args {
            CheckoutArgs::Existing(branch) => format!("checkout {branch}"),
            CheckoutArgs::Track { branch, upstream } => {
                format!("checkout {branch} --track {upstream}")
            }
        };
        self.record("checkout", call)
    }

    async fn add_all(&self) -> Result<()> {
        self.record("add_all", "add_all".to_string())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.record("commit", format!("commit {message}"))
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record("push", format!("push {remote} {branch}"))
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record("fetch", format!("fetch {remote} {branch}"))
    }

    async fn list_remotes(&self) -> Result<Vec<GitRemote>> {
        self.record("list_remotes", "list_remotes".to_string())?;
        Ok(self.remotes.lock().unwrap().clone())
    }

    async fn last_commit_message(&self) -> Result<Option<String>> {
        self.record("last_commit_message", "last_commit_message".to_string())?;
        Ok(self.last_commit.lock().unwrap().clone())
    }
}
