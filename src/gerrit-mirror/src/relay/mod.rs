//! Relays CI statuses from mirror pull requests to Gerrit as review comments.
//!
//! A message counts as relayed once any comment on the change contains it,
//! so repeated passes post each distinct message at most once.

mod error;
mod message;

pub use error::RelayError;
pub use message::RelayMessage;

use crate::gerrit::{ReviewSource, SourceChange};
use crate::github::{CommitStatus, MirrorHost, MirrorPullRequest};
use crate::settings::SyncSettings;
use tracing::{debug, info, info_span, Instrument};

/// Selects the messages that still need posting on `change`.
///
/// Keeps terminal statuses of `context` whose message no existing comment
/// contains. Identical messages within `statuses` are returned once.
#[must_use]
pub fn pending_messages(
    change: &SourceChange,
    statuses: &[CommitStatus],
    context: &str,
) -> Vec<RelayMessage> {
    let mut pending: Vec<RelayMessage> = Vec::new();
    for status in statuses.iter().filter(|s| s.context == context) {
        let Some(message) = RelayMessage::from_status(status) else {
            continue;
        };
        if change.has_comment_containing(&message.text) {
            continue;
        }
        if pending.iter().any(|p| p.text == message.text) {
            continue;
        }
        pending.push(message);
    }
    pending
}

/// Relays the terminal statuses of `pull_request`'s head commit to
/// `change`. Returns the number of comments posted.
///
/// # Errors
///
/// Returns [`RelayError`] if statuses cannot be fetched or a comment cannot
/// be posted; comments posted before the failure stay posted.
pub async fn relay_feedback<S, M>(
    source: &S,
    mirror: &M,
    settings: &SyncSettings,
    change: &SourceChange,
    pull_request: &MirrorPullRequest,
) -> Result<usize, RelayError>
where
    S: ReviewSource + ?Sized,
    M: MirrorHost + ?Sized,
{
    let span = info_span!(
        "relay_feedback",
        change_id = %change.id,
        pr = pull_request.number,
        sha = %pull_request.head_sha
    );

    async {
        let statuses = mirror
            .commit_statuses(&pull_request.head_repo_full_name, &pull_request.head_sha)
            .await?;
        let pending = pending_messages(change, &statuses, &settings.status_context);
        debug!(
            statuses = statuses.len(),
            pending = pending.len(),
            "Checked statuses"
        );

        for message in &pending {
            source
                .post_review(&message.to_review(change, settings))
                .await?;
            info!(message = %message.text, failed = message.failed, "Relayed status to Gerrit");
        }
        Ok(pending.len())
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gerrit::ChangeComment;
    use crate::github::StatusState;

    const CONTEXT: &str = "continuous-integration/travis-ci/pr";

    fn change(comments: &[&str]) -> SourceChange {
        SourceChange {
            project: "foo".to_string(),
            id: "Iabc123".to_string(),
            current_revision: "deadbeef".to_string(),
            fetch_ref: "refs/changes/1/1".to_string(),
            subject: "subject".to_string(),
            comments: comments.iter().map(|c| ChangeComment::new(*c)).collect(),
        }
    }

    fn status(context: &str, state: StatusState, description: &str, target: &str) -> CommitStatus {
        CommitStatus {
            context: context.to_string(),
            state,
            description: Some(description.to_string()),
            target_url: Some(target.to_string()),
        }
    }

    #[test]
    fn keeps_terminal_statuses_of_the_configured_context() {
        let statuses = vec![
            status(CONTEXT, StatusState::Failure, "tests failed", "http://ci/42"),
            status(CONTEXT, StatusState::Pending, "running", "http://ci/43"),
            status("other/ci", StatusState::Success, "ok", "http://other/1"),
            status(CONTEXT, StatusState::Success, "tests passed", "http://ci/41"),
        ];

        let pending = pending_messages(&change(&[]), &statuses, CONTEXT);
        assert_eq!(
            pending,
            vec![
                RelayMessage {
                    text: "tests failed: http://ci/42".to_string(),
                    failed: true,
                },
                RelayMessage {
                    text: "tests passed: http://ci/41".to_string(),
                    failed: false,
                },
            ]
        );
    }

    #[test]
    fn skips_messages_already_in_a_comment() {
        let statuses = vec![status(
            CONTEXT,
            StatusState::Failure,
            "tests failed",
            "http://ci/42",
        )];
        let change = change(&["Patch Set 1: Code-Review-1\n\ntests failed: http://ci/42"]);
        assert!(pending_messages(&change, &statuses, CONTEXT).is_empty());
    }

    #[test]
    fn posts_duplicate_statuses_once() {
        let statuses = vec![
            status(CONTEXT, StatusState::Success, "tests passed", "http://ci/7"),
            status(CONTEXT, StatusState::Success, "tests passed", "http://ci/7"),
        ];
        assert_eq!(pending_messages(&change(&[]), &statuses, CONTEXT).len(), 1);
    }

    #[test]
    fn prefix_messages_within_a_pass_are_distinct() {
        let long_first = vec![
            status(CONTEXT, StatusState::Failure, "tests failed", "http://ci/10"),
            status(CONTEXT, StatusState::Failure, "tests failed", "http://ci/1"),
        ];
        let short_first: Vec<_> = long_first.iter().rev().cloned().collect();

        assert_eq!(pending_messages(&change(&[]), &long_first, CONTEXT).len(), 2);
        assert_eq!(pending_messages(&change(&[]), &short_first, CONTEXT).len(), 2);
    }

    #[test]
    fn failure_review_carries_negative_vote() {
        let settings = SyncSettings::default();
        let message = RelayMessage {
            text: "tests failed: http://ci/42".to_string(),
            failed: true,
        };
        let review = message.to_review(&change(&[]), &settings);
        assert_eq!(review.change_id, "Iabc123");
        assert_eq!(review.revision, "deadbeef");
        assert_eq!(review.labels.get("Code-Review"), Some(&-1));
    }

    #[test]
    fn success_review_has_no_vote() {
        let message = RelayMessage {
            text: "tests passed: http://ci/41".to_string(),
            failed: false,
        };
        let review = message.to_review(&change(&[]), &SyncSettings::default());
        assert!(review.labels.is_empty());
    }
}
