//! Commit status events reported by CI on the mirror.

use serde::Deserialize;

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
    #[serde(other)]
    Unknown,
}

impl StatusState {
    /// Returns true for states that mark a finished CI run worth relaying.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// A status event recorded against a commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitStatus {
    pub context: String,
    pub state: StatusState,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
}

impl CommitStatus {
    /// Canonical relay message: `"<description>: <target-link>"`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{}: {}",
            self.description.as_deref().unwrap_or_default(),
            self.target_url.as_deref().unwrap_or_default()
        )
    }
}
