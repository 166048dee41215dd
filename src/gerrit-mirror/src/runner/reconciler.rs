//! One reconciliation pass: fetch, join, classify and dispatch.

use super::SyncError;
use crate::action::{plan, Plan};
use crate::gerrit::ReviewSource;
use crate::git::BranchSync;
use crate::github::{MirrorHost, MirrorPullRequest};
use crate::matcher::join;
use crate::pull_requests::{close_pull_request, open_pull_request};
use crate::relay::relay_feedback;
use crate::settings::SyncSettings;
use crate::summary::CycleSummary;
use tracing::{debug, info, info_span, warn, Instrument};

/// Drives Gerrit changes and mirror pull requests towards agreement.
///
/// Each pass rebuilds its view from scratch, so a failed pass is repaired by
/// the next one. Records are handled one at a time, and every collaborator
/// call completes before the next starts.
pub struct Reconciler<S, M, B> {
    source: S,
    mirror: M,
    branches: B,
    settings: SyncSettings,
    dry_run: bool,
}

impl<S, M, B> Reconciler<S, M, B>
where
    S: ReviewSource,
    M: MirrorHost,
    B: BranchSync,
{
    pub fn new(source: S, mirror: M, branches: B, settings: SyncSettings) -> Self {
        Self {
            source,
            mirror,
            branches,
            settings,
            dry_run: false,
        }
    }

    /// In dry-run mode records are classified and counted but nothing is
    /// mutated.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs one pass.
    ///
    /// # Errors
    ///
    /// The first failure aborts the pass. Records already handled keep their
    /// new state.
    pub async fn reconcile_once(&self) -> Result<CycleSummary, SyncError> {
        let mut summary = CycleSummary::new(self.dry_run);

        let changes = self.source.open_changes().await?;
        summary.changes_fetched = changes.len();
        let pull_requests = self.mirror_pull_requests().await?;

        let records = join(changes, pull_requests);
        summary.pull_requests_fetched = records
            .values()
            .filter(|record| record.pull_request.is_some())
            .count();
        info!(
            changes = summary.changes_fetched,
            pull_requests = summary.pull_requests_fetched,
            records = records.len(),
            "Joined changes and pull requests"
        );

        for (change_id, record) in &records {
            let planned = plan(change_id, record)?;
            let action = planned.action();
            summary.record_action(action);

            let span = info_span!("reconcile", %change_id, %action);
            self.execute(planned, &mut summary)
                .instrument(span)
                .await
                .map_err(|source| SyncError::Record {
                    change_id: change_id.clone(),
                    action,
                    source: Box::new(source),
                })?;
        }

        summary.log();
        Ok(summary)
    }

    async fn mirror_pull_requests(&self) -> Result<Vec<MirrorPullRequest>, SyncError> {
        let repositories = self.mirror.repositories().await?;
        let mut pull_requests = Vec::new();
        for repository in &repositories {
            pull_requests.extend(self.mirror.pull_requests(repository).await?);
        }
        debug!(
            repositories = repositories.len(),
            pull_requests = pull_requests.len(),
            "Listed mirror pull requests"
        );
        Ok(pull_requests)
    }

    async fn execute(&self, plan: Plan<'_>, summary: &mut CycleSummary) -> Result<(), SyncError> {
        if self.dry_run {
            info!("Dry run, skipping");
            return Ok(());
        }

        match plan {
            Plan::CreateAndOpen { change } => {
                info!(project = %change.project, "Change needs a pull request, creating one");
                self.branches
                    .sync_branch(&change.project, &change.id, &change.fetch_ref)
                    .await?;
                open_pull_request(&self.mirror, &self.settings, change).await?;
            }
            Plan::UpdateAndRelay {
                change,
                pull_request,
            } => {
                info!(
                    pr = pull_request.number,
                    from = %pull_request.head_sha,
                    to = %change.current_revision,
                    "Change has a new revision, syncing branch"
                );
                self.branches
                    .sync_branch(&change.project, &change.id, &change.fetch_ref)
                    .await?;
            }
            Plan::NoOp {
                change,
                pull_request,
            } => {
                debug!(pr = pull_request.number, "Already in sync");
                summary.comments_posted += relay_feedback(
                    &self.source,
                    &self.mirror,
                    &self.settings,
                    change,
                    pull_request,
                )
                .await?;
            }
            Plan::CloseAndDelete { pull_request } => {
                info!(
                    repository = %pull_request.repository,
                    pr = pull_request.number,
                    "Pull request has no open change, closing"
                );
                summary.comments_posted += self.relay_final_statuses(pull_request).await;
                close_pull_request(&self.mirror, pull_request).await?;
                self.branches
                    .delete_branch(&pull_request.repository, &pull_request.head_ref)
                    .await?;
            }
        }
        Ok(())
    }

    /// Relays statuses of a pull request whose change is no longer open.
    /// Failures are logged and otherwise ignored.
    async fn relay_final_statuses(&self, pull_request: &MirrorPullRequest) -> usize {
        let change = match self.source.change(&pull_request.head_ref).await {
            Ok(Some(change)) => change,
            Ok(None) => {
                debug!("Change unknown to Gerrit, nothing to relay");
                return 0;
            }
            Err(e) => {
                warn!(error = %e, "Failed to look up closed change");
                return 0;
            }
        };

        match relay_feedback(
            &self.source,
            &self.mirror,
            &self.settings,
            &change,
            pull_request,
        )
        .await
        {
            Ok(posted) => posted,
            Err(e) => {
                warn!(error = %e, "Failed to relay final statuses");
                0
            }
        }
    }
}
