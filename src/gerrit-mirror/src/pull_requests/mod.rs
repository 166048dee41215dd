//! Opening and closing mirror pull requests.
//!
//! Branches are owned by [`BranchSync`](crate::git::BranchSync): a pull
//! request is only opened once its head has been pushed, and closing one
//! leaves the branch for the caller to delete.

use crate::gerrit::SourceChange;
use crate::github::{MirrorError, MirrorHost, MirrorPullRequest, NewPullRequest};
use crate::settings::SyncSettings;
use tracing::{info, info_span, Instrument};

/// Builds the pull request mirroring `change`.
#[must_use]
pub fn build_pull_request(change: &SourceChange, settings: &SyncSettings) -> NewPullRequest {
    NewPullRequest {
        repository: change.project.clone(),
        title: change.subject.clone(),
        body: settings.pull_request_body.clone(),
        head: change.id.clone(),
        base: settings.default_branch.clone(),
    }
}

/// Opens the pull request for `change`. The branch named after the change
/// must already exist on the mirror.
///
/// # Errors
///
/// Returns [`MirrorError::PullRequestConflict`] if the branch already has a
/// pull request, which means the join missed it.
pub async fn open_pull_request<M>(
    mirror: &M,
    settings: &SyncSettings,
    change: &SourceChange,
) -> Result<u64, MirrorError>
where
    M: MirrorHost + ?Sized,
{
    let request = build_pull_request(change, settings);
    let span = info_span!(
        "open_pull_request",
        repository = %request.repository,
        head = %request.head,
        base = %request.base
    );

    async {
        let number = mirror.create_pull_request(&request).await?;
        info!(pr = number, "Pull request opened");
        Ok(number)
    }
    .instrument(span)
    .await
}

/// Closes `pull_request`.
pub async fn close_pull_request<M>(
    mirror: &M,
    pull_request: &MirrorPullRequest,
) -> Result<(), MirrorError>
where
    M: MirrorHost + ?Sized,
{
    mirror.close_pull_request(pull_request).await?;
    info!(
        repository = %pull_request.repository,
        pr = pull_request.number,
        "Pull request closed"
    );
    Ok(())
}
