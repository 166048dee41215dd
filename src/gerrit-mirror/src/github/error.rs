//! Mirror (GitHub) error types.

use thiserror::Error;

/// Errors that can occur while talking to the mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// A pull request already exists for this head branch.
    #[error("A pull request for {head} already exists in {repository}")]
    PullRequestConflict { repository: String, head: String },

    /// The head branch does not exist on the mirror.
    #[error("Branch {head} does not exist in {repository}")]
    MissingHead { repository: String, head: String },

    /// Malformed credentials.
    #[error("Invalid mirror credentials: {message}")]
    Credentials { message: String },
}
