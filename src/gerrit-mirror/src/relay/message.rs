//! A status event ready to be relayed.

use crate::gerrit::{Review, SourceChange};
use crate::github::{CommitStatus, StatusState};
use crate::settings::SyncSettings;
use std::collections::BTreeMap;

/// A terminal status event rendered as a Gerrit comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    /// Canonical text, `"<description>: <target-link>"`.
    pub text: String,

    /// Whether the run failed, which adds a negative vote.
    pub failed: bool,
}

impl RelayMessage {
    /// Renders a terminal status; returns `None` for non-terminal states.
    #[must_use]
    pub fn from_status(status: &CommitStatus) -> Option<Self> {
        if !status.state.is_terminal() {
            return None;
        }
        Some(Self {
            text: status.message(),
            failed: status.state == StatusState::Failure,
        })
    }

    /// Builds the review posting this message on the current revision of
    /// `change`.
    #[must_use]
    pub fn to_review(&self, change: &SourceChange, settings: &SyncSettings) -> Review {
        let mut labels = BTreeMap::new();
        if self.failed {
            labels.insert(settings.failure_label.clone(), settings.failure_score);
        }
        Review {
            change_id: change.id.clone(),
            revision: change.current_revision.clone(),
            message: self.text.clone(),
            labels,
        }
    }
}
