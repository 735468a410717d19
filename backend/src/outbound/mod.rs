//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the in-process user store.
//! - **github**: reqwest-backed issue filing against the GitHub REST API.
//!
//! Adapters translate between domain types and infrastructure representations
//! and contain no business logic.

pub mod github;
pub mod memory;
