//! Gerrit client error types.

use thiserror::Error;

/// Errors that can occur while talking to Gerrit.
#[derive(Debug, Error)]
pub enum GerritError {
    /// Transport-level failure.
    #[error("Gerrit request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("Gerrit returned {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("Failed to decode Gerrit response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The change lists no fetch ref for its current revision.
    #[error("Change {change_id} has no ref for current revision {revision}")]
    MissingRevision { change_id: String, revision: String },

    /// Malformed credentials.
    #[error("Invalid Gerrit credentials: {message}")]
    Credentials { message: String },
}
