//! The reconciliation unit.

use crate::gerrit::SourceChange;
use crate::github::MirrorPullRequest;

/// Both sides of one change identifier. At least one side is present for
/// every record produced by [`Join`](super::Join).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinedRecord {
    pub source_change: Option<SourceChange>,
    pub pull_request: Option<MirrorPullRequest>,
}

impl JoinedRecord {
    /// Returns true if neither side is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source_change.is_none() && self.pull_request.is_none()
    }
}
