//! Issue payload filed with the external tracker for undeclared failures.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::timestamp::format_millis;
use super::{TraceId, UnexpectedFailure};

const TITLE_PREFIX: &str = "Automated: Exception";
const NO_MESSAGE: &str = "<no message>";

/// Issue-creation payload.
///
/// Serialises to the tracker's `{title, body, assignees}` request shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub title: String,
    pub body: String,
    pub assignees: Vec<String>,
}

impl IssueReport {
    /// Describe `failure` as observed at `at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use user_registry::domain::{IssueReport, UnexpectedFailure};
    ///
    /// let failure = UnexpectedFailure::new("PoisonError", Some("lock poisoned".into()), "trace");
    /// let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    /// let report = IssueReport::for_failure(&failure, at, None, vec!["copilot".into()]);
    ///
    /// assert_eq!(report.title, "Automated: Exception - PoisonError: lock poisoned");
    /// assert!(report.body.starts_with("Timestamp: 2026-01-02T03:04:05.000Z"));
    /// ```
    #[must_use]
    pub fn for_failure(
        failure: &UnexpectedFailure,
        at: DateTime<Utc>,
        trace_id: Option<TraceId>,
        assignees: Vec<String>,
    ) -> Self {
        let message = failure.message().unwrap_or(NO_MESSAGE);
        let title = format!("{TITLE_PREFIX} - {kind}: {message}", kind = failure.kind());

        let mut body = format!(
            "Timestamp: {timestamp}\n\n",
            timestamp = format_millis(&at)
        );
        if let Some(trace_id) = trace_id {
            body.push_str(&format!("Trace-Id: {trace_id}\n\n"));
        }
        body.push_str(&format!("Message: {message}\n\n"));
        body.push_str(&format!(
            "Stacktrace:\n```text\n{trace}\n```\n",
            trace = failure.trace().trim_end()
        ));

        Self {
            title,
            body,
            assignees,
        }
    }
}
