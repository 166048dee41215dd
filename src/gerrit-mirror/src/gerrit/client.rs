//! Gerrit REST client.

use super::change_info::{parse_body, ChangeInfo};
use super::review::ReviewInput;
use super::{GerritError, Review, ReviewSource, SourceChange};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info_span, Instrument};

/// Environment variable holding optional `user:password` HTTP credentials.
pub const GERRIT_AUTH_ENV: &str = "GERRIT_AUTH";

/// Query selecting every open change.
const OPEN_QUERY: &str = "is:open";

/// HTTP basic credentials for authenticated (`/a/`) Gerrit endpoints.
#[derive(Clone)]
pub struct GerritAuth {
    username: String,
    password: String,
}

impl std::fmt::Debug for GerritAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GerritAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl GerritAuth {
    /// Parses `user:password`.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::Credentials`] if either half is missing.
    pub fn parse(value: &str) -> Result<Self, GerritError> {
        match value.split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Self {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            _ => Err(GerritError::Credentials {
                message: format!("{GERRIT_AUTH_ENV} must be \"username:password\""),
            }),
        }
    }

    /// Reads credentials from [`GERRIT_AUTH_ENV`]; `Ok(None)` when unset.
    pub fn from_env() -> Result<Option<Self>, GerritError> {
        match std::env::var(GERRIT_AUTH_ENV) {
            Ok(value) if !value.is_empty() => Self::parse(&value).map(Some),
            _ => Ok(None),
        }
    }
}

/// Client for the subset of the Gerrit REST API used for mirroring.
#[derive(Debug, Clone)]
pub struct GerritClient {
    http: Client,
    base_url: String,
    auth: Option<GerritAuth>,
}

impl GerritClient {
    /// Creates a client for the Gerrit instance at `base_url`.
    pub fn new(base_url: &str, auth: Option<GerritAuth>) -> Result<Self, GerritError> {
        let http = Client::builder()
            .user_agent(concat!("gerrit-mirror/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Builds an endpoint URL, using the authenticated prefix when
    /// credentials are configured.
    fn endpoint(&self, path: &str) -> String {
        match self.auth {
            Some(_) => format!("{}/a/{}", self.base_url, path),
            None => format!("{}/{}", self.base_url, path),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, Some(&auth.password)),
            None => request,
        }
    }

    /// Sends a request and returns the body of a successful response, or
    /// `None` for 404.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Option<String>, GerritError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GerritError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(Some(body))
    }

    async fn query_page(&self, skip: usize) -> Result<Vec<ChangeInfo>, GerritError> {
        let url = self.endpoint("changes/");
        let request = self.http.get(&url).query(&[
            ("q", OPEN_QUERY.to_string()),
            ("o", "CURRENT_REVISION".to_string()),
            ("o", "MESSAGES".to_string()),
            ("S", skip.to_string()),
        ]);
        match self.send(request, &url).await? {
            Some(body) => parse_body(&body, &url),
            None => Err(GerritError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                url,
                body: String::new(),
            }),
        }
    }
}

#[async_trait]
impl ReviewSource for GerritClient {
    async fn open_changes(&self) -> Result<Vec<SourceChange>, GerritError> {
        async {
            let mut changes = Vec::new();
            loop {
                let page = self.query_page(changes.len()).await?;
                let more = page.last().is_some_and(|info| info.more_changes);
                let fetched = page.len();
                for info in page {
                    changes.push(info.into_source_change()?);
                }
                debug!(fetched, total = changes.len(), more, "Fetched page of open changes");
                if !more || fetched == 0 {
                    break;
                }
            }
            Ok(changes)
        }
        .instrument(info_span!("gerrit_open_changes"))
        .await
    }

    async fn change(&self, change_id: &str) -> Result<Option<SourceChange>, GerritError> {
        let url = self.endpoint(&format!("changes/{change_id}"));
        let request = self
            .http
            .get(&url)
            .query(&[("o", "CURRENT_REVISION"), ("o", "MESSAGES")]);
        match self.send(request, &url).await? {
            Some(body) => {
                let info: ChangeInfo = parse_body(&body, &url)?;
                info.into_source_change().map(Some)
            }
            None => Ok(None),
        }
    }

    async fn post_review(&self, review: &Review) -> Result<(), GerritError> {
        let url = self.endpoint(&format!(
            "changes/{}/revisions/{}/review",
            review.change_id, review.revision
        ));
        debug!(change_id = %review.change_id, revision = %review.revision, "Posting review");
        let request = self.http.post(&url).json(&ReviewInput::from(review));
        match self.send(request, &url).await? {
            Some(_) => Ok(()),
            None => Err(GerritError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                url,
                body: String::new(),
            }),
        }
    }
}
