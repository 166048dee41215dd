//! Wires the Gerrit, GitHub and git collaborators into a scheduled
//! reconciliation loop.

mod config;
mod error;
mod reconciler;
mod schedule;

pub use config::{SyncConfig, DEFAULT_MIRROR_GIT_URL};
pub use error::SyncError;
pub use reconciler::Reconciler;
pub use schedule::Schedule;

use crate::gerrit::GerritClient;
use crate::git::{BranchSynchronizer, Remotes};
use crate::github::GitHubClient;
use crate::summary::CycleSummary;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::info;

/// Reconciler backed by the real Gerrit, GitHub and git collaborators.
pub struct Runner {
    reconciler: Reconciler<GerritClient, GitHubClient, BranchSynchronizer>,
    schedule: Schedule,
    work_dir: PathBuf,
    // Removed on drop.
    _temp_dir: Option<TempDir>,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// Without a configured work directory, working copies live in a
    /// temporary directory that is removed when the runner is dropped. A
    /// repeating schedule with a zero period is rejected.
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        config.schedule().validate()?;
        let (work_dir, temp_dir) = match config.work_dir() {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(SyncError::WorkDir)?;
                // Absolute, so git's discovery ceiling applies.
                (std::fs::canonicalize(dir).map_err(SyncError::WorkDir)?, None)
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix("gitsync")
                    .tempdir()
                    .map_err(SyncError::WorkDir)?;
                (temp.path().to_path_buf(), Some(temp))
            }
        };

        let settings = config.settings().clone();
        let source = GerritClient::new(config.gerrit_url(), config.gerrit_auth().cloned())?;
        let mirror = GitHubClient::new(
            config.github_owner(),
            config.credential(),
            config.github_api(),
        )?;
        let remotes = Remotes::new(
            config.gerrit_url(),
            config.mirror_git_url(),
            config.github_owner(),
            config.credential().clone(),
        );
        let branches = BranchSynchronizer::new(&work_dir, remotes, &settings.default_branch);

        let reconciler =
            Reconciler::new(source, mirror, branches, settings).with_dry_run(config.dry_run());

        Ok(Self {
            reconciler,
            schedule: config.schedule(),
            work_dir,
            _temp_dir: temp_dir,
        })
    }

    /// Runs cycles according to the configured schedule.
    ///
    /// A single-cycle schedule returns that cycle's summary; a repeating one
    /// returns only on the first failed cycle.
    pub async fn run(&self) -> Result<CycleSummary, SyncError> {
        info!(
            schedule = %self.schedule,
            work_dir = %self.work_dir.display(),
            "Starting mirror"
        );
        self.schedule
            .drive(move || self.reconciler.reconcile_once())
            .await
    }
}
