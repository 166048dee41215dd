//! GitHub implementation of [`MirrorHost`].

use super::pull_request::PullRequestPayload;
use super::rate_limit::ensure_core_rate_limit;
use super::{
    CommitStatus, MirrorCredential, MirrorError, MirrorHost, MirrorPullRequest, NewPullRequest,
};
use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Results per page for list endpoints.
const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct ListParams {
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
}

#[derive(Deserialize)]
struct RepoSummary {
    name: String,
}

#[derive(Serialize)]
struct StateUpdate {
    state: &'static str,
}

/// Mirror host backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
}

impl GitHubClient {
    /// Builds a client for repositories owned by `owner`.
    ///
    /// `api_base` overrides the API endpoint (GitHub Enterprise).
    pub fn new(
        owner: &str,
        credential: &MirrorCredential,
        api_base: Option<&str>,
    ) -> Result<Self, MirrorError> {
        let mut builder = Octocrab::builder().personal_token(credential.token().to_string());
        if let Some(base) = api_base {
            builder = builder.base_uri(base)?;
        }
        Ok(Self {
            octocrab: builder.build()?,
            owner: owner.to_string(),
        })
    }
}

#[async_trait]
impl MirrorHost for GitHubClient {
    async fn repositories(&self) -> Result<Vec<String>, MirrorError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let params = ListParams {
            per_page: PER_PAGE,
            state: None,
        };
        let first: Page<RepoSummary> = self
            .octocrab
            .get(format!("/users/{}/repos", self.owner), Some(&params))
            .await?;
        let repos = self.octocrab.all_pages(first).await?;
        debug!(owner = %self.owner, count = repos.len(), "Listed mirror repositories");
        Ok(repos.into_iter().map(|repo| repo.name).collect())
    }

    async fn pull_requests(&self, repository: &str) -> Result<Vec<MirrorPullRequest>, MirrorError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let params = ListParams {
            per_page: PER_PAGE,
            state: Some("open"),
        };
        let first: Page<PullRequestPayload> = self
            .octocrab
            .get(
                format!("/repos/{}/{}/pulls", self.owner, repository),
                Some(&params),
            )
            .await?;
        let pulls = self.octocrab.all_pages(first).await?;
        Ok(pulls
            .into_iter()
            .map(|pr| pr.into_mirror(&self.owner, repository))
            .collect())
    }

    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<u64, MirrorError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let result = self
            .octocrab
            .pulls(&self.owner, &request.repository)
            .create(&request.title, &request.head, &request.base)
            .body(&request.body)
            .send()
            .await;

        match result {
            Ok(pr) => Ok(pr.number),
            Err(e) => Err(classify_create_error(e, request)),
        }
    }

    async fn close_pull_request(&self, pull_request: &MirrorPullRequest) -> Result<(), MirrorError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let _: serde_json::Value = self
            .octocrab
            .patch(
                format!(
                    "/repos/{}/pulls/{}",
                    pull_request.head_repo_full_name, pull_request.number
                ),
                Some(&StateUpdate { state: "closed" }),
            )
            .await?;
        Ok(())
    }

    async fn commit_statuses(
        &self,
        repo_full_name: &str,
        sha: &str,
    ) -> Result<Vec<CommitStatus>, MirrorError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let params = ListParams {
            per_page: PER_PAGE,
            state: None,
        };
        let statuses: Vec<CommitStatus> = self
            .octocrab
            .get(
                format!("/repos/{repo_full_name}/commits/{sha}/statuses"),
                Some(&params),
            )
            .await?;
        Ok(statuses)
    }
}

/// Maps a pull request creation failure onto the conditions the reconciler
/// must distinguish. GitHub reports both as 422 validation failures, so the
/// error details are inspected.
fn classify_create_error(error: octocrab::Error, request: &NewPullRequest) -> MirrorError {
    let details = format!("{error:?}").to_lowercase();
    if details.contains("already exists") {
        MirrorError::PullRequestConflict {
            repository: request.repository.clone(),
            head: request.head.clone(),
        }
    } else if is_invalid_head(&details) {
        MirrorError::MissingHead {
            repository: request.repository.clone(),
            head: request.head.clone(),
        }
    } else {
        MirrorError::GitHubError(error)
    }
}

fn is_invalid_head(details: &str) -> bool {
    details.contains("\"head\"") && details.contains("invalid")
}
