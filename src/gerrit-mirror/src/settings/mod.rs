//! Tunable mirroring settings.
//!
//! Settings come from an optional TOML file; every key has a default, so a
//! missing file yields the stock behaviour.

mod error;

pub use error::SettingsError;

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Branch every mirror pull request targets.
pub const DEFAULT_BRANCH: &str = "master";

/// Status context relayed back to Gerrit.
pub const DEFAULT_STATUS_CONTEXT: &str = "continuous-integration/travis-ci/pr";

/// Label voted on when CI fails.
pub const DEFAULT_FAILURE_LABEL: &str = "Code-Review";

/// Vote cast on [`DEFAULT_FAILURE_LABEL`] when CI fails.
pub const DEFAULT_FAILURE_SCORE: i32 = -1;

/// Body of every pull request opened on the mirror.
pub const DEFAULT_PULL_REQUEST_BODY: &str =
    "Automatically created pull request. **Do not review or merge this PR.**";

/// Settings parsed from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SyncSettings {
    /// Branch pull requests target and new change branches start from.
    pub default_branch: String,

    /// The only status context relayed to Gerrit.
    pub status_context: String,

    /// Label voted on when a relayed status is a failure.
    pub failure_label: String,

    /// Score cast on `failure_label`; must be negative.
    pub failure_score: i32,

    /// Pull request body.
    pub pull_request_body: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            status_context: DEFAULT_STATUS_CONTEXT.to_string(),
            failure_label: DEFAULT_FAILURE_LABEL.to_string(),
            failure_score: DEFAULT_FAILURE_SCORE,
            pull_request_body: DEFAULT_PULL_REQUEST_BODY.to_string(),
        }
    }
}

impl SyncSettings {
    /// Loads settings from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Self = toml::from_str(&contents).map_err(|source| SettingsError::TomlError {
            path: path.display().to_string(),
            source,
        })?;
        settings.validate(path)?;

        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), SettingsError> {
        let fail = |message: &str| {
            Err(SettingsError::ValidationError {
                path: path.display().to_string(),
                message: message.to_string(),
            })
        };

        if self.default_branch.trim().is_empty() {
            return fail("default-branch must not be empty");
        }
        if self.status_context.trim().is_empty() {
            return fail("status-context must not be empty");
        }
        if self.failure_label.trim().is_empty() {
            return fail("failure-label must not be empty");
        }
        if self.failure_score >= 0 {
            return fail("failure-score must be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("settings.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = SyncSettings::load(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(settings, SyncSettings::default());
        assert_eq!(settings.default_branch, "master");
        assert_eq!(settings.failure_score, -1);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(
            &temp,
            r#"
default-branch = "main"
status-context = "ci/build"
"#,
        );
        let settings = SyncSettings::load(&path).unwrap();
        assert_eq!(settings.default_branch, "main");
        assert_eq!(settings.status_context, "ci/build");
        assert_eq!(settings.failure_label, DEFAULT_FAILURE_LABEL);
        assert_eq!(settings.pull_request_body, DEFAULT_PULL_REQUEST_BODY);
    }

    #[test]
    fn rejects_non_negative_failure_score() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "failure-score = 1\n");
        assert!(matches!(
            SyncSettings::load(&path),
            Err(SettingsError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "defualt-branch = \"main\"\n");
        assert!(matches!(
            SyncSettings::load(&path),
            Err(SettingsError::TomlError { .. })
        ));
    }

    #[test]
    fn rejects_empty_status_context() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "status-context = \"  \"\n");
        assert!(SyncSettings::load(&path).is_err());
    }
}
