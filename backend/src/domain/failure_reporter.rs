//! Best-effort reporting of undeclared failures to an issue tracker.
//!
//! Reporting never feeds back into the response path: every tracker error is
//! logged here and converted into a [`ReportOutcome`]. [`FailureReporter::dispatch`]
//! runs the single attempt on a detached task so the caller is not held up.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ports::{FiledIssue, IssueTracker, IssueTrackerError};
use super::{IssueReport, TraceId, UnexpectedFailure};

/// Result of one reporting attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No tracker is configured.
    Disabled,
    /// The tracker accepted the report.
    Filed(FiledIssue),
    /// The attempt failed and was logged.
    Failed(IssueTrackerError),
}

/// Files one issue per undeclared failure when a tracker is configured.
pub struct FailureReporter {
    tracker: Option<Arc<dyn IssueTracker>>,
    assignees: Vec<String>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl FailureReporter {
    /// Reporter that files through `tracker`.
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        assignees: Vec<String>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            tracker: Some(tracker),
            assignees,
            clock,
        }
    }

    /// Reporter that never contacts a tracker.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            tracker: None,
            assignees: Vec::new(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Whether a tracker is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tracker.is_some()
    }

    /// Make one attempt to file `failure`, logging the outcome.
    pub async fn report(&self, failure: &UnexpectedFailure) -> ReportOutcome {
        let Some(tracker) = &self.tracker else {
            debug!(kind = failure.kind(), "issue reporting disabled");
            return ReportOutcome::Disabled;
        };

        let report = IssueReport::for_failure(
            failure,
            self.clock.utc(),
            TraceId::current(),
            self.assignees.clone(),
        );
        match tracker.file_issue(&report).await {
            Ok(issue) => {
                info!(
                    issue_number = issue.number,
                    issue_url = %issue.url,
                    kind = failure.kind(),
                    "filed issue for undeclared failure"
                );
                ReportOutcome::Filed(issue)
            }
            Err(error) => {
                warn!(%error, kind = failure.kind(), "failed to file issue for undeclared failure");
                ReportOutcome::Failed(error)
            }
        }
    }

    /// Spawn [`Self::report`] on the current runtime without awaiting it.
    ///
    /// Returns `None` without spawning when reporting is disabled. The active
    /// [`TraceId`] is carried onto the spawned task.
    pub fn dispatch(
        self: &Arc<Self>,
        failure: UnexpectedFailure,
    ) -> Option<JoinHandle<ReportOutcome>> {
        if !self.is_enabled() {
            return None;
        }
        let reporter = Arc::clone(self);
        let attempt = async move { reporter.report(&failure).await };
        let handle = match TraceId::current() {
            Some(trace_id) => tokio::spawn(TraceId::scope(trace_id, attempt)),
            None => tokio::spawn(attempt),
        };
        Some(handle)
    }
}
