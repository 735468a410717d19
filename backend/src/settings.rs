//! Process configuration loaded via OrthoConfig.
//!
//! [`ServerSettings`] controls the listener and accepts command-line flags as
//! well as `USER_REGISTRY_*` environment variables. [`TrackerSettings`] holds
//! the GitHub issue tracker credentials and is read from `GITHUB_*`
//! environment variables or the configuration file only.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::outbound::github::GithubRepository;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_ASSIGNEE: &str = "copilot";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error when the host does not resolve to any address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no address found for {}:{}", self.host(), self.port()),
                )
            })
    }
}

/// GitHub issue tracker configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GITHUB")]
pub struct TrackerSettings {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Access token used to file issues.
    pub token: Option<String>,
    /// API base URL; override for GitHub Enterprise.
    pub api_url: Option<String>,
    /// Login assigned to filed issues.
    pub assignee: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Repository and token required to file issues.
pub struct TrackerCredentials {
    pub repository: GithubRepository,
    pub token: Zeroizing<String>,
}

impl TrackerSettings {
    /// Credentials when owner, repo and token are all non-blank.
    pub fn credentials(&self) -> Option<TrackerCredentials> {
        let owner = non_blank(self.owner.as_deref())?;
        let repo = non_blank(self.repo.as_deref())?;
        let token = non_blank(self.token.as_deref())?;
        Some(TrackerCredentials {
            repository: GithubRepository {
                owner: owner.to_owned(),
                repo: repo.to_owned(),
            },
            token: Zeroizing::new(token.to_owned()),
        })
    }

    /// Configured API base URL, falling back to the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(non_blank(self.api_url.as_deref()).unwrap_or(DEFAULT_API_URL))
    }

    /// Logins assigned to filed issues.
    pub fn assignees(&self) -> Vec<String> {
        let assignee = non_blank(self.assignee.as_deref()).unwrap_or(DEFAULT_ASSIGNEE);
        vec![assignee.to_owned()]
    }

    /// Per-request timeout, falling back to five seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl fmt::Debug for TrackerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerSettings")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("assignee", &self.assignee)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
