//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! domain ports, so they can be exercised without the production store.

use std::sync::Arc;

use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Construct state around a user store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserStore;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserStore::with_sample_users()));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
