//! Cycle summary types.

use crate::action::Action;
use tracing::info;

/// Summary of one reconciliation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Number of open Gerrit changes fetched.
    pub changes_fetched: usize,

    /// Number of Change-Id pull requests found on the mirror.
    pub pull_requests_fetched: usize,

    /// Records classified as [`Action::CreateAndOpen`].
    pub created: usize,

    /// Records classified as [`Action::UpdateAndRelay`].
    pub updated: usize,

    /// Records classified as [`Action::CloseAndDelete`].
    pub closed: usize,

    /// Records classified as [`Action::NoOp`].
    pub unchanged: usize,

    /// Comments posted to Gerrit.
    pub comments_posted: usize,

    /// Whether mutations were skipped.
    pub dry_run: bool,
}

impl CycleSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Counts a dispatched action.
    pub fn record_action(&mut self, action: Action) {
        match action {
            Action::CreateAndOpen => self.created += 1,
            Action::UpdateAndRelay => self.updated += 1,
            Action::CloseAndDelete => self.closed += 1,
            Action::NoOp => self.unchanged += 1,
        }
    }

    /// Returns true if the cycle changed branches or pull requests.
    #[must_use]
    pub fn has_mutations(&self) -> bool {
        self.created + self.updated + self.closed > 0
    }

    /// Logs the summary.
    pub fn log(&self) {
        info!(
            changes = self.changes_fetched,
            pull_requests = self.pull_requests_fetched,
            created = self.created,
            updated = self.updated,
            closed = self.closed,
            unchanged = self.unchanged,
            comments = self.comments_posted,
            dry_run = self.dry_run,
            "Cycle complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_actions() {
        let mut summary = CycleSummary::new(false);
        summary.record_action(Action::CreateAndOpen);
        summary.record_action(Action::NoOp);
        summary.record_action(Action::NoOp);

        assert_eq!(summary.created, 1);
        assert_eq!(summary.unchanged, 2);
        assert!(summary.has_mutations());
    }

    #[test]
    fn no_op_cycle_has_no_mutations() {
        let mut summary = CycleSummary::new(false);
        summary.record_action(Action::NoOp);
        assert!(!summary.has_mutations());
    }
}
