//! Error types for gitlab-mr

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the merge request workflows and their collaborators
#[derive(Debug, Error)]
pub enum Error {
    // ---------------------------------------------------------------------
    // Validation: reported before any side effect
    // ---------------------------------------------------------------------
    /// Desired branch name was empty
    #[error("Branch name must be provided.")]
    EmptyBranchName,

    /// Desired branch name contains whitespace
    #[error("Branch name must not contain spaces: '{0}'")]
    InvalidBranchName(String),

    /// Desired branch is the same as the branch it would merge into
    #[error("Source branch cannot be the same as the target branch ({0}).")]
    BranchEqualsTarget(String),

    /// Working copy is on a feature branch other than the desired source branch
    #[error("Branch '{branch}' is not checked out (working copy is on '{current}').")]
    BranchNotCheckedOut {
        /// Desired source branch
        branch: String,
        /// Checked-out branch, or `HEAD` when detached
        current: String,
    },

    /// Changes need committing but no commit message was given
    #[error("Commit message must be provided to commit pending changes.")]
    EmptyCommitMessage,

    /// Title edit with an empty title
    #[error("Merge request title must not be empty.")]
    EmptyTitle,

    // ---------------------------------------------------------------------
    // Preconditions: fatal, abort before side effects
    // ---------------------------------------------------------------------
    /// Working copy has conflicted paths
    #[error("Unresolved conflicts, please resolve before opening MR: {}", .0.join(", "))]
    UnresolvedConflicts(Vec<String>),

    /// Repository has no remotes at all
    #[error("No remotes configured.")]
    NoRemotesConfigured,

    /// Requested remote does not exist
    #[error("Target remote '{0}' does not exist.")]
    RemoteNotFound(String),

    /// Remote URL could not be parsed into host and project path
    #[error("Unable to parse remote URL: {0}")]
    InvalidRemoteUrl(String),

    /// No access token configured for the forge host
    #[error("No access token configured for {api_url}. Run `glmr auth --host {api_url}`.")]
    MissingAccessToken {
        /// API base URL the token was looked up under
        api_url: String,
    },

    /// Path is not inside a git working copy
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    // ---------------------------------------------------------------------
    // Remote state: recoverable
    // ---------------------------------------------------------------------
    /// An open MR already exists for the source branch
    #[error("{message}")]
    DuplicateMergeRequest {
        /// iid of the existing MR, when the forge message names it
        iid: Option<u64>,
        /// Forge message, verbatim
        message: String,
    },

    /// User search returned no exact username match
    #[error("No GitLab user named '{0}'.")]
    UserNotFound(String),

    /// Forge returned no open merge requests
    #[error("No merge requests found.")]
    NoMergeRequestsFound,

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------
    /// Forge reported a duplicate-resource conflict (HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// Any other GitLab API failure, message verbatim
    #[error("{0}")]
    GitLabApi(String),

    /// git command failure
    #[error("git: {0}")]
    Git(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------------------------------------------------
    // Other
    // ---------------------------------------------------------------------
    /// Preferences could not be read or written
    #[error("config: {0}")]
    Config(String),

    /// Unexpected internal failure (terminal I/O and the like)
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is a validation failure raised before any side effect
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyBranchName
                | Self::InvalidBranchName(_)
                | Self::BranchEqualsTarget(_)
                | Self::BranchNotCheckedOut { .. }
                | Self::EmptyCommitMessage
                | Self::EmptyTitle
        )
    }
}
