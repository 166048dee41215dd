//! Git error types.

use thiserror::Error;

/// Errors that can occur while synchronizing branches.
#[derive(Debug, Error)]
pub enum GitError {
    /// `git` could not be spawned.
    #[error("Failed to execute git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    /// `git` exited unsuccessfully. `args` has credentials redacted.
    #[error("git {args} failed:\n{output}")]
    Command { args: String, output: String },

    /// The working copy path exists but is not a directory.
    #[error("Clone destination is not a directory: {path}")]
    NotADirectory { path: String },

    /// Filesystem failure on the working copy.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The change identifier is not usable as a branch name.
    #[error("'{name}' is not a valid branch name: {reason}")]
    InvalidBranch { name: String, reason: String },
}
