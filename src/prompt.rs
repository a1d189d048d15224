//! UI boundary
//!
//! Workflows never render anything themselves. They ask a [`Prompter`] for
//! values and hand it status lines and notifications. A prompt that comes
//! back empty ends the workflow with [`Flow::Cancelled`].

use crate::error::Result;

/// Result of a workflow that the user may abandon part way
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Flow<T> {
    /// The workflow ran to the end
    Completed(T),
    /// A prompt was dismissed, or there was nothing to choose from.
    /// No further side effects were performed.
    Cancelled,
}

impl<T> Flow<T> {
    /// The completed value, if any
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    /// Whether the workflow was abandoned
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Success or neutral information
    Info,
    /// Failure
    Error,
}

/// A terminal notification, optionally offering one follow-up action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
    /// Label of the offered action (e.g., "Open MR")
    pub action: Option<String>,
}

impl Notice {
    /// Informational notice without an action
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            action: None,
        }
    }

    /// Error notice without an action
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            action: None,
        }
    }

    /// Offer an action alongside the notice
    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action = Some(label.into());
        self
    }
}

/// Interactive surface the workflows drive
///
/// Calls are synchronous: a workflow blocks on the answer before issuing any
/// further git or forge operation.
pub trait Prompter {
    /// Ask for one line of text. `None` (or an empty answer) means dismissed.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Ask for one of `items`. `None` means dismissed.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Show a transient progress line
    fn status(&self, message: &str);

    /// Show a notification. Returns `true` when the offered action was accepted.
    fn notify(&self, notice: &Notice) -> Result<bool>;

    /// Open a URL in the user's browser
    fn open_url(&self, url: &str) -> Result<()>;
}
