//! Shared command context for CLI commands
//!
//! Every command that talks to the forge needs the same setup: preferences,
//! the working copy, the resolved remote, and a lifecycle client.

use gitlab_mr::config::{Preferences, config_path, load_preferences};
use gitlab_mr::error::{Error, Result};
use gitlab_mr::lifecycle::MrLifecycle;
use gitlab_mr::platform::GitLabService;
use gitlab_mr::remote::{resolve, resolve_token};
use gitlab_mr::repo::GitCli;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load preferences from disk with environment overrides applied
pub fn load_config() -> Result<(PathBuf, Preferences)> {
    let path = config_path()?;
    let prefs = load_preferences(&path)?.with_env_overrides(|key| std::env::var(key).ok());
    Ok((path, prefs))
}

/// Shared context for commands that interact with GitLab
pub struct CommandContext {
    /// The git working copy
    pub repo: GitCli,
    /// Resolved preferences
    pub prefs: Preferences,
    /// Where `prefs` were loaded from
    pub config_path: PathBuf,
    /// MR operations for the remote's project
    pub lifecycle: MrLifecycle,
    /// Selected remote name
    pub remote_name: String,
    /// Basis branch (configured target branch, else the project default)
    pub basis_branch: String,
}

impl CommandContext {
    /// Open the working copy at `path` and connect to the forge behind `remote`
    /// (or the configured target remote).
    pub async fn new(path: &Path, remote: Option<&str>) -> Result<Self> {
        let (config_path, mut prefs) = load_config()?;
        if let Some(remote) = remote {
            prefs.target_remote = remote.to_string();
        }

        let repo = GitCli::open(path).await?;
        let credentials = prefs.credentials();
        let descriptor = resolve(&repo, &prefs.target_remote, &credentials).await?;
        let token = resolve_token(&descriptor.repo_host, &credentials)?;

        let forge = GitLabService::for_remote(&descriptor, token)?;
        let lifecycle = MrLifecycle::new(Box::new(forge), descriptor);

        let basis_branch = match &prefs.target_branch {
            Some(branch) => branch.clone(),
            None => lifecycle.project().await?.default_branch.ok_or_else(|| {
                Error::Config(
                    "no target_branch configured and the project has no default branch"
                        .to_string(),
                )
            })?,
        };
        debug!(basis = %basis_branch, remote = %prefs.target_remote, "command context ready");

        Ok(Self {
            repo,
            remote_name: prefs.target_remote.clone(),
            prefs,
            config_path,
            lifecycle,
            basis_branch,
        })
    }
}
