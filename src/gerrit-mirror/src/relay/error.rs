//! Feedback relay error types.

use crate::gerrit::GerritError;
use crate::github::MirrorError;
use thiserror::Error;

/// Errors that can occur while relaying statuses.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Fetching statuses from the mirror failed.
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    /// Posting the comment to Gerrit failed.
    #[error(transparent)]
    Gerrit(#[from] GerritError),
}
