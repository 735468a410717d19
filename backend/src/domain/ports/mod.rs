//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod issue_tracker;
mod user_store;

#[cfg(test)]
pub use issue_tracker::MockIssueTracker;
pub use issue_tracker::{FiledIssue, IssueTracker, IssueTrackerError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
