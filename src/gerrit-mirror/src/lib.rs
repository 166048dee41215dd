#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod action;
pub mod gerrit;
pub mod git;
pub mod github;
pub mod matcher;
pub mod pull_requests;
pub mod relay;
pub mod runner;
pub mod settings;
pub mod summary;

pub use action::{classify, plan, Action, ClassifyError, Plan};
pub use gerrit::{
    ChangeComment, GerritAuth, GerritClient, GerritError, Review, ReviewSource, SourceChange,
    GERRIT_AUTH_ENV,
};
pub use git::{validate_branch_name, BranchSync, BranchSynchronizer, GitError, Remotes};
pub use github::{
    check_core_rate_limit, ensure_core_rate_limit, CommitStatus, GitHubClient, MirrorCredential,
    MirrorError, MirrorHost, MirrorPullRequest, NewPullRequest, RateLimitInfo, StatusState,
    MIRROR_AUTH_ENV,
};
pub use matcher::{is_change_id, join, Join, JoinedRecord, CHANGE_ID_PREFIX};
pub use pull_requests::{build_pull_request, close_pull_request, open_pull_request};
pub use relay::{pending_messages, relay_feedback, RelayError, RelayMessage};
pub use runner::{Reconciler, Runner, Schedule, SyncConfig, SyncError, DEFAULT_MIRROR_GIT_URL};
pub use settings::{SettingsError, SyncSettings};
pub use summary::CycleSummary;
