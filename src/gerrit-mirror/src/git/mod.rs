//! Branch synchronization between Gerrit and the mirror.

mod branch_sync;
mod command;
mod error;
mod remotes;

pub use branch_sync::BranchSynchronizer;
pub use error::GitError;
pub use remotes::Remotes;

use async_trait::async_trait;
use bstr::ByteSlice;

/// Mirror-side branch operations. Each operation is idempotent.
#[async_trait]
pub trait BranchSync: Send + Sync {
    /// Points the mirror branch `change_id` at the commit `fetch_ref`
    /// resolves to in Gerrit, force-pushing over rewritten history.
    async fn sync_branch(&self, project: &str, change_id: &str, fetch_ref: &str)
        -> Result<(), GitError>;

    /// Deletes the mirror branch `change_id`.
    async fn delete_branch(&self, project: &str, change_id: &str) -> Result<(), GitError>;
}

/// Checks that `name` can be used as a branch name.
pub fn validate_branch_name(name: &str) -> Result<(), GitError> {
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| GitError::InvalidBranch {
            name: name.to_string(),
            reason: e.to_string(),
        })
}
