//! GitHub, the mirror receiving branches and pull requests.

mod client;
mod credential;
mod error;
mod pull_request;
mod rate_limit;
mod status;

pub use client::GitHubClient;
pub use credential::{MirrorCredential, MIRROR_AUTH_ENV};
pub use error::MirrorError;
pub use pull_request::{MirrorPullRequest, NewPullRequest};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, RateLimitInfo};
pub use status::{CommitStatus, StatusState};

use async_trait::async_trait;

/// Pull request and status API of the mirror account.
#[async_trait]
pub trait MirrorHost: Send + Sync {
    /// Names of every repository owned by the mirror account.
    async fn repositories(&self) -> Result<Vec<String>, MirrorError>;

    /// Open pull requests of one mirror repository.
    async fn pull_requests(&self, repository: &str) -> Result<Vec<MirrorPullRequest>, MirrorError>;

    /// Opens a pull request and returns its number.
    ///
    /// Fails with [`MirrorError::PullRequestConflict`] if the head already
    /// has one.
    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<u64, MirrorError>;

    /// Transitions a pull request to `closed`. The head branch is left alone.
    async fn close_pull_request(&self, pull_request: &MirrorPullRequest) -> Result<(), MirrorError>;

    /// Status events recorded against a commit.
    async fn commit_statuses(
        &self,
        repo_full_name: &str,
        sha: &str,
    ) -> Result<Vec<CommitStatus>, MirrorError>;
}
