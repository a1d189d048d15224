//! `VersionControl` backed by the `git` executable

use super::VersionControl;
use super::parse::{parse_branch_list, parse_porcelain_status, parse_remote_list};
use crate::error::{Error, Result};
use crate::types::{CheckoutArgs, GitRemote, WorkingCopyStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Git working copy driven through the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Open the working copy containing `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .await
            .map_err(|e| Error::NotARepository(format!("{}: {e}", path.display())))?;

        if !output.status.success() {
            return Err(Error::NotARepository(path.display().to_string()));
        }

        let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(root = %root.display(), "opened working copy");
        Ok(Self { root })
    }

    /// Root directory of the working copy
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command in the working copy and return stdout.
    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| Error::Git(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn current_branch(&self) -> Option<String> {
        // Fails on a detached HEAD
        self.run(&["symbolic-ref", "--quiet", "--short", "HEAD"])
            .await
            .ok()
            .map(|out| out.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn status(&self) -> Result<WorkingCopyStatus> {
        let output = self.run(&["status", "--porcelain=v1"]).await?;
        let mut status = parse_porcelain_status(&output);
        status.current = self.current_branch().await;
        Ok(status)
    }

    async fn list_branches(&self) -> Result<BTreeMap<String, String>> {
        let output = self
            .run(&[
                "for-each-ref",
                "--format=%(refname:short) %(objectname)",
                "refs/heads",
            ])
            .await?;
        Ok(parse_branch_list(&output))
    }

    async fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name]).await.map(drop)
    }

    async fn checkout(&self, args: &CheckoutArgs) -> Result<()> {
        match args {
            CheckoutArgs::Existing(branch) => self.run(&["checkout", branch]).await.map(drop),
            CheckoutArgs::Track { branch, upstream } => self
                .run(&["checkout", "-b", branch, "--track", upstream])
                .await
                .map(drop),
        }
    }

    async fn add_all(&self) -> Result<()> {
        self.run(&["add", "--all"]).await.map(drop)
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).await.map(drop)
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "-u", remote, branch]).await.map(drop)
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("+refs/heads/{branch}:refs/remotes/{remote}/{branch}");
        self.run(&["fetch", remote, &refspec]).await.map(drop)
    }

    async fn list_remotes(&self) -> Result<Vec<GitRemote>> {
        let output = self.run(&["remote", "-v"]).await?;
        Ok(parse_remote_list(&output))
    }

    async fn last_commit_message(&self) -> Result<Option<String>> {
        // Unborn branches have no HEAD commit
        match self.run(&["log", "-1", "--format=%s"]).await {
            Ok(out) => Ok(Some(out.trim().to_string()).filter(|s| !s.is_empty())),
            Err(e) => {
                debug!(error = %e, "no last commit message");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_nonexistent_path_is_not_a_repository() {
        let result = GitCli::open(Path::new("/nonexistent/path/to/repo")).await;
        assert!(matches!(result, Err(Error::NotARepository(_))));
    }
}
