//! Classification of joined records into reconciliation actions.

mod error;

pub use error::ClassifyError;

use crate::gerrit::SourceChange;
use crate::github::MirrorPullRequest;
use crate::matcher::JoinedRecord;
use std::fmt;

/// What a reconciliation pass does for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Push the branch, then open a pull request.
    CreateAndOpen,
    /// Move the branch to the new revision.
    UpdateAndRelay,
    /// Relay final statuses, close the pull request and delete the branch.
    CloseAndDelete,
    /// Branch is current; only relay feedback.
    NoOp,
}

impl Action {
    /// Returns the action name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateAndOpen => "create",
            Self::UpdateAndRelay => "update",
            Self::CloseAndDelete => "close",
            Self::NoOp => "no-op",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`Action`] together with the record sides it operates on.
#[derive(Debug, Clone, Copy)]
pub enum Plan<'a> {
    CreateAndOpen {
        change: &'a SourceChange,
    },
    UpdateAndRelay {
        change: &'a SourceChange,
        pull_request: &'a MirrorPullRequest,
    },
    CloseAndDelete {
        pull_request: &'a MirrorPullRequest,
    },
    NoOp {
        change: &'a SourceChange,
        pull_request: &'a MirrorPullRequest,
    },
}

impl Plan<'_> {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::CreateAndOpen { .. } => Action::CreateAndOpen,
            Self::UpdateAndRelay { .. } => Action::UpdateAndRelay,
            Self::CloseAndDelete { .. } => Action::CloseAndDelete,
            Self::NoOp { .. } => Action::NoOp,
        }
    }
}

/// Plans the work for `record`.
///
/// Revision equality between the change and the pull request head is the
/// only convergence signal.
///
/// # Errors
///
/// Returns [`ClassifyError::EmptyRecord`] for a record with neither side,
/// which the matcher never produces.
pub fn plan<'a>(key: &str, record: &'a JoinedRecord) -> Result<Plan<'a>, ClassifyError> {
    match (&record.source_change, &record.pull_request) {
        (Some(change), None) => Ok(Plan::CreateAndOpen { change }),
        (Some(change), Some(pull_request)) if pull_request.head_sha == change.current_revision => {
            Ok(Plan::NoOp {
                change,
                pull_request,
            })
        }
        (Some(change), Some(pull_request)) => Ok(Plan::UpdateAndRelay {
            change,
            pull_request,
        }),
        (None, Some(pull_request)) => Ok(Plan::CloseAndDelete { pull_request }),
        (None, None) => Err(ClassifyError::EmptyRecord {
            key: key.to_string(),
        }),
    }
}

/// Classifies `record` into an [`Action`].
pub fn classify(key: &str, record: &JoinedRecord) -> Result<Action, ClassifyError> {
    plan(key, record).map(|plan| plan.action())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(revision: &str) -> SourceChange {
        SourceChange {
            project: "foo".to_string(),
            id: "Iabc123".to_string(),
            current_revision: revision.to_string(),
            fetch_ref: "refs/changes/1/1".to_string(),
            subject: "subject".to_string(),
            comments: Vec::new(),
        }
    }

    fn pull_request(sha: &str) -> MirrorPullRequest {
        MirrorPullRequest {
            number: 1,
            repository: "foo".to_string(),
            head_ref: "Iabc123".to_string(),
            head_sha: sha.to_string(),
            head_repo_full_name: "AugieBot/foo".to_string(),
            base_ref: "master".to_string(),
        }
    }

    fn record(change: Option<SourceChange>, pull_request: Option<MirrorPullRequest>) -> JoinedRecord {
        JoinedRecord {
            source_change: change,
            pull_request,
        }
    }

    #[test]
    fn change_without_pull_request_is_created() {
        let r = record(Some(change("deadbeef")), None);
        assert_eq!(classify("Iabc123", &r).unwrap(), Action::CreateAndOpen);
    }

    #[test]
    fn matching_revision_is_no_op() {
        let r = record(Some(change("deadbeef")), Some(pull_request("deadbeef")));
        assert_eq!(classify("Iabc123", &r).unwrap(), Action::NoOp);
    }

    #[test]
    fn diverged_revision_is_updated() {
        let r = record(Some(change("cafef00d")), Some(pull_request("deadbeef")));
        assert_eq!(classify("Iabc123", &r).unwrap(), Action::UpdateAndRelay);
    }

    #[test]
    fn orphaned_pull_request_is_closed() {
        let r = record(None, Some(pull_request("deadbeef")));
        assert_eq!(classify("Iabc123", &r).unwrap(), Action::CloseAndDelete);
    }

    #[test]
    fn empty_record_is_a_defect() {
        let r = record(None, None);
        assert!(matches!(
            classify("Iabc123", &r),
            Err(ClassifyError::EmptyRecord { key }) if key == "Iabc123"
        ));
    }

    #[test]
    fn classification_is_deterministic() {
        let r = record(Some(change("cafef00d")), Some(pull_request("deadbeef")));
        let first = classify("Iabc123", &r).unwrap();
        for _ in 0..10 {
            assert_eq!(classify("Iabc123", &r).unwrap(), first);
        }
    }

    #[test]
    fn plan_exposes_record_sides() {
        let r = record(Some(change("cafef00d")), Some(pull_request("deadbeef")));
        match plan("Iabc123", &r).unwrap() {
            Plan::UpdateAndRelay {
                change,
                pull_request,
            } => {
                assert_eq!(change.current_revision, "cafef00d");
                assert_eq!(pull_request.head_sha, "deadbeef");
            }
            other => panic!("unexpected plan: {:?}", other.action()),
        }
    }
}
