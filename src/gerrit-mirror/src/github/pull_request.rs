//! Mirror pull request types.

use serde::Deserialize;

/// An open pull request in a mirror repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPullRequest {
    /// Pull request number, unique within `repository`.
    pub number: u64,

    /// Mirror repository the pull request was listed under.
    pub repository: String,

    /// Head branch name.
    pub head_ref: String,

    /// Tip commit of the head branch.
    pub head_sha: String,

    /// `owner/name` of the repository owning the head branch.
    pub head_repo_full_name: String,

    /// Target branch.
    pub base_ref: String,
}

/// Request to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Mirror repository name.
    pub repository: String,
    pub title: String,
    pub body: String,
    /// Head branch, which must already exist on the mirror.
    pub head: String,
    pub base: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestPayload {
    pub number: u64,
    pub head: BranchPayload,
    pub base: BranchPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchPayload {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
    pub repo: Option<RepoPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoPayload {
    pub full_name: String,
}

impl PullRequestPayload {
    /// Converts into a [`MirrorPullRequest`]. A head repository that has been
    /// deleted falls back to `owner/repository`.
    pub fn into_mirror(self, owner: &str, repository: &str) -> MirrorPullRequest {
        let head_repo_full_name = self
            .head
            .repo
            .map(|repo| repo.full_name)
            .unwrap_or_else(|| format!("{owner}/{repository}"));
        MirrorPullRequest {
            number: self.number,
            repository: repository.to_string(),
            head_ref: self.head.ref_name,
            head_sha: self.head.sha,
            head_repo_full_name,
            base_ref: self.base.ref_name,
        }
    }
}
