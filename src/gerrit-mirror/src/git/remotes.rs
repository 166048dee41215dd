//! Fetch and push locations for a project.

use crate::github::MirrorCredential;
use url::Url;

/// Resolves where a project is fetched from and pushed to.
#[derive(Debug, Clone)]
pub struct Remotes {
    source_base: String,
    mirror_base: String,
    mirror_owner: String,
    credential: MirrorCredential,
}

impl Remotes {
    /// `source_base` is the Gerrit base URL; `mirror_base` is the git host
    /// of the mirror (e.g. `https://github.com`). Either may also be a local
    /// directory path.
    pub fn new(
        source_base: &str,
        mirror_base: &str,
        mirror_owner: &str,
        credential: MirrorCredential,
    ) -> Self {
        Self {
            source_base: source_base.trim_end_matches('/').to_string(),
            mirror_base: mirror_base.trim_end_matches('/').to_string(),
            mirror_owner: mirror_owner.to_string(),
            credential,
        }
    }

    /// Gerrit repository URL of `project`.
    #[must_use]
    pub fn source_url(&self, project: &str) -> String {
        format!("{}/{}", self.source_base, project)
    }

    /// Authenticated mirror repository URL of `project`.
    ///
    /// Network URLs get the credential as userinfo; anything else (a local
    /// path) is used verbatim.
    #[must_use]
    pub fn mirror_url(&self, project: &str) -> String {
        let plain = format!("{}/{}/{}", self.mirror_base, self.mirror_owner, project);
        match Url::parse(&plain) {
            Ok(mut url) if url.has_host() => {
                let authed = url.set_username(self.credential.username()).is_ok()
                    && url.set_password(Some(self.credential.token())).is_ok();
                if authed {
                    url.to_string()
                } else {
                    plain
                }
            }
            _ => plain,
        }
    }
}
