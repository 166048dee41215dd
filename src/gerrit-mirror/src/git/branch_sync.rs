//! Git-level convergence of mirror branches.

use super::command::{git_output, run_git};
use super::{validate_branch_name, BranchSync, GitError, Remotes};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn, Instrument};

/// Synchronizes mirror branches through per-project working copies kept
/// under a work directory.
///
/// Working copies persist between cycles and are refreshed rather than
/// re-cloned. Only one operation touches a working copy at a time.
#[derive(Debug, Clone)]
pub struct BranchSynchronizer {
    work_dir: PathBuf,
    remotes: Remotes,
    default_branch: String,
}

impl BranchSynchronizer {
    pub fn new(work_dir: impl Into<PathBuf>, remotes: Remotes, default_branch: &str) -> Self {
        Self {
            work_dir: work_dir.into(),
            remotes,
            default_branch: default_branch.to_string(),
        }
    }

    /// Directory holding the working copy of `project`.
    #[must_use]
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.work_dir.join(project)
    }

    /// Makes sure an up-to-date working copy of `project` exists and has the
    /// default branch checked out.
    ///
    /// An existing working copy is refreshed; failing to check out or
    /// fast-forward the default branch is logged and tolerated. A directory
    /// that is not the top level of a readable working copy (no `.git`, or
    /// a corrupted one) is replaced by a fresh clone.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotADirectory`] if the path is occupied by a file,
    /// or the clone failure.
    pub async fn ensure_local_clone(&self, project: &str) -> Result<PathBuf, GitError> {
        let dir = self.project_dir(project);

        match tokio::fs::metadata(&dir).await {
            Ok(meta) if !meta.is_dir() => {
                return Err(GitError::NotADirectory {
                    path: dir.display().to_string(),
                });
            }
            Ok(_) => {
                if is_working_copy(&dir).await {
                    self.refresh(&dir).await;
                    return Ok(dir);
                }
                warn!(path = %dir.display(), "Directory is not a usable working copy, recloning");
                tokio::fs::remove_dir_all(&dir)
                    .await
                    .map_err(|source| io_error(&dir, source))?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(io_error(&dir, source)),
        }

        self.clone_into(project, &dir).await?;
        Ok(dir)
    }

    async fn refresh(&self, dir: &Path) {
        if let Err(e) = run_git(dir, &["checkout", &self.default_branch]).await {
            warn!(path = %dir.display(), error = %e, "Failed to check out default branch");
            return;
        }
        if let Err(e) = run_git(dir, &["pull", "--ff-only"]).await {
            warn!(path = %dir.display(), error = %e, "Failed to fast-forward default branch");
        }
    }

    async fn clone_into(&self, project: &str, dir: &Path) -> Result<(), GitError> {
        info!(project, path = %dir.display(), "Cloning project");
        let parent = dir.parent().unwrap_or(&self.work_dir);
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| io_error(parent, source))?;

        let url = self.remotes.source_url(project);
        let dest = dir.display().to_string();
        if let Err(e) = run_git(parent, &["clone", &url, &dest]).await {
            if let Err(cleanup) = tokio::fs::remove_dir_all(dir).await {
                debug!(path = %dir.display(), error = %cleanup, "Nothing to clean up after failed clone");
            }
            return Err(e);
        }

        run_git(dir, &["checkout", &self.default_branch]).await
    }
}

#[async_trait]
impl BranchSync for BranchSynchronizer {
    async fn sync_branch(
        &self,
        project: &str,
        change_id: &str,
        fetch_ref: &str,
    ) -> Result<(), GitError> {
        let span = info_span!("sync_branch", project, change_id, fetch_ref);
        async {
            validate_branch_name(change_id)?;
            let dir = self.ensure_local_clone(project).await?;

            if let Err(e) = run_git(&dir, &["checkout", change_id]).await {
                debug!(error = %e, "No local branch for change, creating one");
                run_git(&dir, &["checkout", "-b", change_id]).await?;
            }

            let source = self.remotes.source_url(project);
            run_git(&dir, &["fetch", "-f", &source, fetch_ref]).await?;
            run_git(&dir, &["reset", "--hard", "FETCH_HEAD"]).await?;

            let dest = self.remotes.mirror_url(project);
            let refspec = format!("refs/heads/{change_id}:refs/heads/{change_id}");
            run_git(&dir, &["push", "-f", &dest, &refspec]).await?;

            info!("Branch pushed to mirror");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn delete_branch(&self, project: &str, change_id: &str) -> Result<(), GitError> {
        let span = info_span!("delete_branch", project, change_id);
        async {
            validate_branch_name(change_id)?;
            let dir = self.ensure_local_clone(project).await?;

            let dest = self.remotes.mirror_url(project);
            run_git(&dir, &["push", "--delete", &dest, change_id]).await?;
            info!("Branch deleted from mirror");

            // The working copy is disposable, so a stale local branch is harmless.
            if let Err(e) = run_git(&dir, &["branch", "-D", change_id]).await {
                warn!(error = %e, "Failed to delete local branch");
            }
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// Returns true if `dir` is the top level of a working copy git can read.
async fn is_working_copy(dir: &Path) -> bool {
    if !dir.join(".git").exists() {
        return false;
    }
    let top_level = match git_output(dir, &["rev-parse", "--show-toplevel"]).await {
        Ok(top_level) => top_level,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Working copy unreadable");
            return false;
        }
    };
    match (
        tokio::fs::canonicalize(&top_level).await,
        tokio::fs::canonicalize(dir).await,
    ) {
        (Ok(top_level), Ok(dir)) => top_level == dir,
        _ => false,
    }
}

fn io_error(path: &Path, source: std::io::Error) -> GitError {
    GitError::Io {
        path: path.display().to_string(),
        source,
    }
}
