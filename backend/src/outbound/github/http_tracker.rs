//! Reqwest-backed GitHub issue tracker adapter.
//!
//! This adapter owns transport details only: endpoint construction, token
//! authentication, timeout and HTTP error mapping, and decoding the created
//! issue reference.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use zeroize::Zeroizing;

use super::dto::CreatedIssueDto;
use crate::domain::IssueReport;
use crate::domain::ports::{FiledIssue, IssueTracker, IssueTrackerError};

const USER_AGENT: &str = concat!("user-registry/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Repository that receives filed issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepository {
    pub owner: String,
    pub repo: String,
}

/// Errors raised while constructing a [`GithubIssueTracker`].
#[derive(Debug, Error)]
pub enum GithubTrackerSetupError {
    /// The API base URL cannot carry path segments.
    #[error("issue tracker API URL cannot be a base: {0}")]
    InvalidApiUrl(Url),
    /// The HTTP client could not be built.
    #[error("failed to build issue tracker HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Issue tracker adapter that POSTs to one repository's issues endpoint.
pub struct GithubIssueTracker {
    client: Client,
    endpoint: Url,
    token: Zeroizing<String>,
}

impl GithubIssueTracker {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// `timeout` bounds both connection establishment and the whole request.
    ///
    /// # Errors
    ///
    /// Returns an error when `api_url` cannot carry a path or the reqwest
    /// client cannot be constructed.
    pub fn new(
        api_url: Url,
        repository: &GithubRepository,
        token: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, GithubTrackerSetupError> {
        let endpoint = issues_endpoint(api_url, repository)?;
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Fully-qualified issue-creation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn authorization(&self) -> Result<HeaderValue, IssueTrackerError> {
        let mut value = HeaderValue::from_str(&format!("token {}", self.token.as_str()))
            .map_err(|_| {
                IssueTrackerError::transport("access token contains invalid header characters")
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl IssueTracker for GithubIssueTracker {
    async fn file_issue(&self, report: &IssueReport) -> Result<FiledIssue, IssueTrackerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization()?)
            .header(ACCEPT, GITHUB_JSON)
            .json(report)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let created: CreatedIssueDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            IssueTrackerError::decode(format!("invalid issue creation payload: {error}"))
        })?;
        Ok(created.into())
    }
}

fn issues_endpoint(
    api_url: Url,
    repository: &GithubRepository,
) -> Result<Url, GithubTrackerSetupError> {
    let mut endpoint = api_url.clone();
    endpoint
        .path_segments_mut()
        .map_err(|()| GithubTrackerSetupError::InvalidApiUrl(api_url))?
        .pop_if_empty()
        .extend(["repos", repository.owner.as_str(), repository.repo.as_str(), "issues"]);
    Ok(endpoint)
}

fn map_transport_error(error: reqwest::Error) -> IssueTrackerError {
    if error.is_timeout() {
        IssueTrackerError::timeout(error.to_string())
    } else {
        IssueTrackerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IssueTrackerError {
    IssueTrackerError::rejected(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
