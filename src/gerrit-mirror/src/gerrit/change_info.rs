//! Gerrit REST wire types.

use super::{ChangeComment, GerritError, SourceChange};
use serde::Deserialize;
use std::collections::HashMap;

/// Prefix Gerrit prepends to every JSON response to defeat XSSI.
const XSSI_PREFIX: &str = ")]}'";

/// `ChangeInfo` entity, restricted to the fields requested with
/// `CURRENT_REVISION` and `MESSAGES`.
#[derive(Debug, Deserialize)]
pub(crate) struct ChangeInfo {
    pub project: String,
    pub change_id: String,
    #[serde(default)]
    pub subject: String,
    pub current_revision: Option<String>,
    #[serde(default)]
    pub revisions: HashMap<String, RevisionInfo>,
    #[serde(default)]
    pub messages: Vec<ChangeMessageInfo>,
    /// Set on the last entry of a page when more results are available.
    #[serde(rename = "_more_changes", default)]
    pub more_changes: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RevisionInfo {
    #[serde(rename = "ref")]
    pub fetch_ref: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeMessageInfo {
    #[serde(default)]
    pub message: String,
}

impl ChangeInfo {
    /// Converts into a [`SourceChange`], resolving the fetch ref of the
    /// current revision.
    pub fn into_source_change(mut self) -> Result<SourceChange, GerritError> {
        let revision = self.current_revision.take().unwrap_or_default();
        let fetch_ref = self
            .revisions
            .remove(&revision)
            .map(|info| info.fetch_ref)
            .ok_or_else(|| GerritError::MissingRevision {
                change_id: self.change_id.clone(),
                revision: revision.clone(),
            })?;

        Ok(SourceChange {
            project: self.project,
            id: self.change_id,
            current_revision: revision,
            fetch_ref,
            subject: self.subject,
            comments: self
                .messages
                .into_iter()
                .map(|m| ChangeComment::new(m.message))
                .collect(),
        })
    }
}

/// Parses a Gerrit JSON response body, stripping the XSSI prefix line.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    body: &str,
    url: &str,
) -> Result<T, GerritError> {
    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body);
    serde_json::from_str(json.trim_start()).map_err(|source| GerritError::Decode {
        url: url.to_string(),
        source,
    })
}
