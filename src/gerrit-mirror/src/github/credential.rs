//! Mirror account credential.

use super::MirrorError;

/// Environment variable holding the `username:personal-access-token` pair.
pub const MIRROR_AUTH_ENV: &str = "GITSYNC_AUTH_TOKEN";

/// Username and personal access token for the mirror account.
///
/// The token authenticates API calls; the pair is embedded in push URLs.
#[derive(Clone, PartialEq, Eq)]
pub struct MirrorCredential {
    username: String,
    token: String,
}

impl std::fmt::Debug for MirrorCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorCredential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl MirrorCredential {
    /// Parses `username:personal-access-token`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Credentials`] if the separator or either half
    /// is missing.
    pub fn parse(value: &str) -> Result<Self, MirrorError> {
        match value.split_once(':') {
            Some((username, token)) if !username.is_empty() && !token.is_empty() => Ok(Self {
                username: username.to_string(),
                token: token.to_string(),
            }),
            _ => Err(MirrorError::Credentials {
                message: format!("{MIRROR_AUTH_ENV} must be \"username:personal-access-token\""),
            }),
        }
    }

    /// Reads the credential from [`MIRROR_AUTH_ENV`].
    pub fn from_env() -> Result<Self, MirrorError> {
        let value = std::env::var(MIRROR_AUTH_ENV).unwrap_or_default();
        Self::parse(&value)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
