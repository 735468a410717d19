//! Builders for the shared state handed to every worker.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use user_registry::domain::FailureReporter;
use user_registry::outbound::github::GithubIssueTracker;
use user_registry::settings::TrackerSettings;

/// Build the failure reporter from tracker settings.
///
/// Reporting is disabled unless owner, repository and token are all set.
///
/// # Errors
/// Returns [`std::io::Error`] when the API URL is invalid or the HTTP client
/// cannot be constructed.
pub fn build_failure_reporter(settings: &TrackerSettings) -> std::io::Result<FailureReporter> {
    let Some(credentials) = settings.credentials() else {
        info!("issue reporting disabled: GitHub owner, repo or token not configured");
        return Ok(FailureReporter::disabled());
    };

    let api_url = settings
        .api_url()
        .map_err(|e| std::io::Error::other(format!("invalid GitHub API URL: {e}")))?;
    let tracker = GithubIssueTracker::new(
        api_url,
        &credentials.repository,
        credentials.token,
        settings.timeout(),
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!(
        owner = %credentials.repository.owner,
        repo = %credentials.repository.repo,
        endpoint = %tracker.endpoint(),
        "issue reporting enabled"
    );

    Ok(FailureReporter::new(
        Arc::new(tracker),
        settings.assignees(),
        Arc::new(DefaultClock),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(owner: Option<&str>, api_url: Option<&str>) -> TrackerSettings {
        TrackerSettings {
            owner: owner.map(str::to_owned),
            repo: Some("registry".to_owned()),
            token: Some("ghp_secret".to_owned()),
            api_url: api_url.map(str::to_owned),
            assignee: None,
            timeout_secs: Some(1),
        }
    }

    #[rstest]
    fn missing_credentials_disable_reporting() {
        let reporter = build_failure_reporter(&settings(None, None)).expect("reporter builds");

        assert!(!reporter.is_enabled());
    }

    #[rstest]
    fn complete_credentials_enable_reporting() {
        let reporter =
            build_failure_reporter(&settings(Some("acme"), None)).expect("reporter builds");

        assert!(reporter.is_enabled());
    }

    #[rstest]
    fn invalid_api_url_is_a_startup_error() {
        let result = build_failure_reporter(&settings(Some("acme"), Some("not a url")));

        assert!(result.is_err());
    }
}
