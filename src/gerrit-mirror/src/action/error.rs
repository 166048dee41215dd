//! Classification error types.

use thiserror::Error;

/// Errors raised while classifying records.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A record with neither a change nor a pull request.
    #[error("Joined record {key} has neither a change nor a pull request")]
    EmptyRecord { key: String },
}
