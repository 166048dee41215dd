//! Gerrit, the source of truth for open changes.
//!
//! The reconciler only ever reads changes from Gerrit and posts review
//! messages back; it never mutates a change otherwise.

mod change_info;
mod client;
mod error;
mod review;
mod source_change;

pub use client::{GerritAuth, GerritClient, GERRIT_AUTH_ENV};
pub use error::GerritError;
pub use review::Review;
pub use source_change::{ChangeComment, SourceChange};

use async_trait::async_trait;

/// Read side and comment side of the upstream review system.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Lists every open change.
    async fn open_changes(&self) -> Result<Vec<SourceChange>, GerritError>;

    /// Looks up a single change by Change-Id regardless of its status.
    ///
    /// Returns `Ok(None)` if the change is unknown.
    async fn change(&self, change_id: &str) -> Result<Option<SourceChange>, GerritError>;

    /// Posts a review message (and optional label votes) on a revision.
    async fn post_review(&self, review: &Review) -> Result<(), GerritError>;
}
