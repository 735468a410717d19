//! GitHub outbound adapters.
//!
//! Provides a thin HTTP implementation of the `IssueTracker` port.

mod dto;
mod http_tracker;

pub use http_tracker::{GithubIssueTracker, GithubRepository, GithubTrackerSetupError};
