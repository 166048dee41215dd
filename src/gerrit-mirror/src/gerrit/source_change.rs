//! Open Gerrit change as seen by the reconciler.

/// A change in the upstream review system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChange {
    /// Gerrit project name, also the mirror repository name.
    pub project: String,

    /// Change-Id (e.g. `I8473b95934b5732ac55d26311a706c9c2bde9940`).
    pub id: String,

    /// Commit hash of the current patch set.
    pub current_revision: String,

    /// Fetchable ref for the current patch set (e.g. `refs/changes/40/1240/3`).
    pub fetch_ref: String,

    /// Change subject, used as the pull request title.
    pub subject: String,

    /// Review messages already posted on the change.
    pub comments: Vec<ChangeComment>,
}

/// A review message posted on a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeComment {
    /// Full message text, including any Gerrit-generated prefix.
    pub text: String,
}

impl ChangeComment {
    /// Creates a comment from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SourceChange {
    /// Returns true if any posted comment contains `message`.
    #[must_use]
    pub fn has_comment_containing(&self, message: &str) -> bool {
        self.comments
            .iter()
            .any(|comment| comment.text.contains(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change_with_comments(comments: &[&str]) -> SourceChange {
        SourceChange {
            project: "foo".to_string(),
            id: "Iabc123".to_string(),
            current_revision: "deadbeef".to_string(),
            fetch_ref: "refs/changes/1/1".to_string(),
            subject: "Add foo".to_string(),
            comments: comments.iter().map(|c| ChangeComment::new(*c)).collect(),
        }
    }

    #[test]
    fn finds_message_embedded_in_gerrit_prefix() {
        let change = change_with_comments(&["Patch Set 1:\n\ntests failed: http://ci/42"]);
        assert!(change.has_comment_containing("tests failed: http://ci/42"));
    }

    #[test]
    fn does_not_match_partial_message() {
        let change = change_with_comments(&["tests failed: http://ci/4"]);
        assert!(!change.has_comment_containing("tests failed: http://ci/42"));
    }

    #[test]
    fn no_comments_never_match() {
        let change = change_with_comments(&[]);
        assert!(!change.has_comment_containing("anything"));
    }
}
