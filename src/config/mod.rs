//! User preferences and forge credentials
//!
//! Preferences are resolved once at invocation start and passed into the
//! workflows by reference; nothing reads configuration ad hoc.

mod storage;

pub use storage::{config_path, load_preferences, save_preferences};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable consulted for the default (gitlab.com) token
pub const TOKEN_ENV_VAR: &str = "GITLAB_TOKEN";

fn default_remote() -> String {
    "origin".to_string()
}

/// Resolved user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Preferences {
    /// Basis branch, also the last used MR target. Falls back to the
    /// project's default branch when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    /// Remote to push to and resolve the forge from
    #[serde(default = "default_remote")]
    pub target_remote: String,
    /// Token for gitlab.com
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Commit pending changes without asking
    pub auto_commit_changes: bool,
    /// Open a created MR in the browser without asking
    pub auto_open_mr: bool,
    /// Open created MRs on their edit page
    pub open_to_edit: bool,
    /// Default for "remove source branch when merged"
    pub remove_source_branch: bool,
    /// Tokens for self-hosted instances, keyed by API base URL
    pub access_tokens: BTreeMap<String, String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            target_branch: None,
            target_remote: default_remote(),
            access_token: None,
            auto_commit_changes: false,
            auto_open_mr: false,
            open_to_edit: false,
            remove_source_branch: false,
            access_tokens: BTreeMap::new(),
        }
    }
}

impl Preferences {
    /// Credential map view of the configured tokens
    pub fn credentials(&self) -> CredentialMap {
        CredentialMap {
            default_token: self.access_token.clone(),
            host_tokens: self.access_tokens.clone(),
        }
    }

    /// Fill unset values from the environment.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.access_token.is_none() {
            self.access_token = lookup(TOKEN_ENV_VAR).filter(|t| !t.trim().is_empty());
        }
        self
    }

    /// Store a token for an API base URL. `https://gitlab.com` goes to the default slot.
    pub fn set_token(&mut self, api_url: &str, token: String) {
        let api_url = api_url.trim_end_matches('/');
        if api_url == crate::remote::PUBLIC_API_URL {
            self.access_token = Some(token);
        } else {
            self.access_tokens.insert(api_url.to_string(), token);
        }
    }
}

/// API base URL → access token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialMap {
    /// Token for the public gitlab.com host
    pub default_token: Option<String>,
    /// Tokens for other hosts keyed by API base URL (e.g., `https://gitlab.example.com`)
    pub host_tokens: BTreeMap<String, String>,
}
