//! Runner error types.

use crate::action::{Action, ClassifyError};
use crate::gerrit::GerritError;
use crate::git::GitError;
use crate::github::MirrorError;
use crate::relay::RelayError;
use crate::settings::SettingsError;

/// Errors that abort a reconciliation cycle.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Settings loading errors.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Gerrit errors.
    #[error(transparent)]
    Gerrit(#[from] GerritError),

    /// GitHub errors.
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    /// Branch synchronization errors.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Feedback relay errors.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// A record violated the join invariant.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// A repeating schedule was given a zero period.
    #[error("Poll period must be greater than zero")]
    ZeroPeriod,

    /// The temporary work directory could not be created.
    #[error("Failed to create work directory: {0}")]
    WorkDir(#[source] std::io::Error),

    /// Failure while dispatching one record.
    #[error("{action} failed for change {change_id}: {source}")]
    Record {
        change_id: String,
        action: Action,
        #[source]
        source: Box<SyncError>,
    },
}
