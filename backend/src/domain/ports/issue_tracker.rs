//! Driven port for filing issue reports with an external tracker.

use async_trait::async_trait;

use crate::domain::IssueReport;

use super::define_port_error;

define_port_error! {
    /// Errors raised while filing an issue report.
    pub enum IssueTrackerError {
        /// The tracker could not be reached.
        Transport { message: String } =>
            "issue tracker transport failed: {message}",
        /// The tracker did not answer within the configured timeout.
        Timeout { message: String } =>
            "issue tracker request timed out: {message}",
        /// The tracker answered with a non-success status.
        Rejected { status: u16, body: String } =>
            "issue tracker rejected the report with status {status}: {body}",
        /// The tracker's success response could not be decoded.
        Decode { message: String } =>
            "issue tracker response could not be decoded: {message}",
    }
}

/// Reference to an issue the tracker accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledIssue {
    pub number: u64,
    pub url: String,
}

/// Port for submitting issue reports.
///
/// Adapters make exactly one attempt per call; retrying is the caller's
/// decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Submit `report` and return the created issue.
    async fn file_issue(&self, report: &IssueReport) -> Result<FiledIssue, IssueTrackerError>;
}
