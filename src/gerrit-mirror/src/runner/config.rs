//! Runner configuration.

use super::Schedule;
use crate::gerrit::GerritAuth;
use crate::github::MirrorCredential;
use crate::settings::SyncSettings;
use std::path::{Path, PathBuf};

/// Git host mirror repositories are pushed to by default.
pub const DEFAULT_MIRROR_GIT_URL: &str = "https://github.com";

/// Configuration for running the mirror.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the Gerrit instance.
    gerrit_url: String,
    /// Optional credentials for authenticated Gerrit endpoints.
    gerrit_auth: Option<GerritAuth>,
    /// GitHub user or organization owning the mirror repositories.
    github_owner: String,
    /// Mirror account credential used for API calls and pushes.
    credential: MirrorCredential,
    /// GitHub API base URL override.
    github_api: Option<String>,
    /// Git host receiving pushes.
    mirror_git_url: String,
    /// Directory for working copies; a temporary one when unset.
    work_dir: Option<PathBuf>,
    /// When cycles run.
    schedule: Schedule,
    /// Whether to plan without mutating anything.
    dry_run: bool,
    /// Tunable behaviour.
    settings: SyncSettings,
}

impl SyncConfig {
    /// Creates a configuration with default settings.
    pub fn new(
        gerrit_url: &str,
        github_owner: &str,
        credential: MirrorCredential,
        schedule: Schedule,
    ) -> Self {
        Self {
            gerrit_url: gerrit_url.trim_end_matches('/').to_string(),
            gerrit_auth: None,
            github_owner: github_owner.to_string(),
            credential,
            github_api: None,
            mirror_git_url: DEFAULT_MIRROR_GIT_URL.to_string(),
            work_dir: None,
            schedule,
            dry_run: false,
            settings: SyncSettings::default(),
        }
    }

    /// Sets Gerrit credentials.
    pub fn with_gerrit_auth(mut self, auth: Option<GerritAuth>) -> Self {
        self.gerrit_auth = auth;
        self
    }

    /// Sets a GitHub API base URL (GitHub Enterprise).
    pub fn with_github_api(mut self, url: Option<String>) -> Self {
        self.github_api = url;
        self
    }

    /// Sets the git host receiving pushes.
    pub fn with_mirror_git_url(mut self, url: &str) -> Self {
        self.mirror_git_url = url.to_string();
        self
    }

    /// Sets a persistent work directory.
    pub fn with_work_dir(mut self, work_dir: Option<PathBuf>) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: SyncSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn gerrit_url(&self) -> &str {
        &self.gerrit_url
    }

    pub fn gerrit_auth(&self) -> Option<&GerritAuth> {
        self.gerrit_auth.as_ref()
    }

    pub fn github_owner(&self) -> &str {
        &self.github_owner
    }

    pub fn credential(&self) -> &MirrorCredential {
        &self.credential
    }

    pub fn github_api(&self) -> Option<&str> {
        self.github_api.as_deref()
    }

    pub fn mirror_git_url(&self) -> &str {
        &self.mirror_git_url
    }

    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_config_uses_defaults() {
        let credential = MirrorCredential::parse("augie:ghp_123").unwrap();
        let config = SyncConfig::new(
            "https://upspin-review.googlesource.com/",
            "AugieBot",
            credential,
            Schedule::Every(Duration::from_secs(600)),
        );

        assert_eq!(config.gerrit_url(), "https://upspin-review.googlesource.com");
        assert_eq!(config.mirror_git_url(), DEFAULT_MIRROR_GIT_URL);
        assert!(config.work_dir().is_none());
        assert!(config.github_api().is_none());
        assert!(!config.dry_run());
        assert_eq!(config.settings(), &SyncSettings::default());
    }

    #[test]
    fn builders_override_defaults() {
        let credential = MirrorCredential::parse("augie:ghp_123").unwrap();
        let config = SyncConfig::new("https://gerrit", "AugieBot", credential, Schedule::Once)
            .with_work_dir(Some(PathBuf::from("/var/lib/mirror")))
            .with_github_api(Some("https://ghe.example.com/api/v3".to_string()))
            .with_mirror_git_url("https://ghe.example.com")
            .with_dry_run(true);

        assert_eq!(config.work_dir(), Some(Path::new("/var/lib/mirror")));
        assert_eq!(config.github_api(), Some("https://ghe.example.com/api/v3"));
        assert_eq!(config.mirror_git_url(), "https://ghe.example.com");
        assert!(config.dry_run());
        assert_eq!(config.schedule(), Schedule::Once);
    }
}
