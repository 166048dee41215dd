//! Identity matching between Gerrit changes and mirror pull requests.
//!
//! The shared identifier is the Change-Id, used verbatim as the mirror
//! branch name. Pull requests whose head branch is not a Change-Id belong to
//! someone else and are never reconciled.

mod joined_record;

pub use joined_record::JoinedRecord;

use crate::gerrit::SourceChange;
use crate::github::MirrorPullRequest;
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// Leading character of every Gerrit Change-Id.
pub const CHANGE_ID_PREFIX: char = 'I';

/// Returns true if `name` looks like a Change-Id.
#[must_use]
pub fn is_change_id(name: &str) -> bool {
    name.starts_with(CHANGE_ID_PREFIX)
}

/// Keyed join of changes and pull requests.
///
/// Insertion order does not affect the result.
#[derive(Debug, Default)]
pub struct Join {
    records: BTreeMap<String, JoinedRecord>,
}

impl Join {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a change under its Change-Id.
    pub fn add_change(&mut self, change: SourceChange) {
        let record = self.records.entry(change.id.clone()).or_default();
        if let Some(previous) = &record.source_change {
            warn!(
                change_id = %change.id,
                project = %change.project,
                previous_project = %previous.project,
                "Change-Id listed twice, keeping the first"
            );
            return;
        }
        record.source_change = Some(change);
    }

    /// Adds a pull request under its head branch, ignoring it unless the
    /// branch is a Change-Id.
    pub fn add_pull_request(&mut self, pull_request: MirrorPullRequest) {
        if !is_change_id(&pull_request.head_ref) {
            trace!(
                repository = %pull_request.repository,
                pr = pull_request.number,
                head = %pull_request.head_ref,
                "Ignoring pull request not created by the mirror"
            );
            return;
        }
        let record = self
            .records
            .entry(pull_request.head_ref.clone())
            .or_default();
        if let Some(previous) = &record.pull_request {
            warn!(
                head = %pull_request.head_ref,
                pr = pull_request.number,
                previous_pr = previous.number,
                "Several pull requests share a head branch, keeping the first"
            );
            return;
        }
        record.pull_request = Some(pull_request);
    }

    /// Finishes the join.
    #[must_use]
    pub fn into_records(self) -> BTreeMap<String, JoinedRecord> {
        self.records
    }
}

/// Joins every change with every Change-Id pull request.
#[must_use]
pub fn join(
    changes: impl IntoIterator<Item = SourceChange>,
    pull_requests: impl IntoIterator<Item = MirrorPullRequest>,
) -> BTreeMap<String, JoinedRecord> {
    let mut join = Join::new();
    for change in changes {
        join.add_change(change);
    }
    for pull_request in pull_requests {
        join.add_pull_request(pull_request);
    }
    join.into_records()
}
