//! Driving port for user registry operations.
//!
//! HTTP handlers depend on this trait only. The production adapter is the
//! in-memory store in `outbound::memory`; tests substitute doubles.

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// No user is registered under the identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// The store's internal state can no longer be trusted.
        Unavailable { message: String } => "user store unavailable: {message}",
    }
}

/// Concurrent CRUD over registered users.
///
/// Implementations must be safe to call from many request contexts at once
/// and must make `update` atomic with respect to concurrent `update` and
/// `delete` calls on the same identifier.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    /// Snapshot of every registered user.
    fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch one user.
    fn get(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Register a user under a freshly assigned identifier.
    fn create(&self, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Replace the name and email of an existing user.
    fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Remove a user, returning whether this call removed it.
    fn delete(&self, id: UserId) -> Result<bool, UserStoreError>;
}
