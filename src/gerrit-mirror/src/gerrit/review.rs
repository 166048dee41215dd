//! Review posted back to a Gerrit change.

use serde::Serialize;
use std::collections::BTreeMap;

/// A review message, optionally voting on labels, for one revision of a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Change-Id the review is posted on.
    pub change_id: String,

    /// Revision (commit hash) the review is posted on.
    pub revision: String,

    /// Message body.
    pub message: String,

    /// Label votes (e.g. `Code-Review: -1`). Empty means no vote.
    pub labels: BTreeMap<String, i32>,
}

/// Wire form of a review (`ReviewInput` in the Gerrit REST API).
#[derive(Debug, Serialize)]
pub(crate) struct ReviewInput<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: &'a BTreeMap<String, i32>,
}

impl<'a> From<&'a Review> for ReviewInput<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            message: &review.message,
            labels: &review.labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_labels_when_empty() {
        let review = Review {
            change_id: "Iabc".to_string(),
            revision: "deadbeef".to_string(),
            message: "ok: http://ci/1".to_string(),
            labels: BTreeMap::new(),
        };
        let json = serde_json::to_value(ReviewInput::from(&review)).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "ok: http://ci/1" }));
    }

    #[test]
    fn serializes_label_votes() {
        let review = Review {
            change_id: "Iabc".to_string(),
            revision: "deadbeef".to_string(),
            message: "tests failed: http://ci/42".to_string(),
            labels: BTreeMap::from([("Code-Review".to_string(), -1)]),
        };
        let json = serde_json::to_value(ReviewInput::from(&review)).unwrap();
        assert_eq!(json["labels"]["Code-Review"], -1);
    }
}
