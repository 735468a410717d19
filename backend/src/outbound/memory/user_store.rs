//! In-memory [`UserStore`] adapter.
//!
//! Users live in a `BTreeMap` behind an `RwLock`; identifiers come from an
//! `AtomicU64` that only ever increments, so deleted identifiers are never
//! handed out again. Every mutation happens under the write lock, which makes
//! `update` atomic with respect to a concurrent `delete` of the same user.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserDraft, UserId};

/// Thread-safe registry of users held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<UserId, User>>,
    last_id: AtomicU64,
}

impl InMemoryUserStore {
    /// Empty store; the first created user receives id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `drafts`, numbered from 1 in iteration order.
    pub fn seeded(drafts: impl IntoIterator<Item = UserDraft>) -> Self {
        let users: BTreeMap<UserId, User> = drafts
            .into_iter()
            .zip(1_u64..)
            .map(|(draft, raw)| {
                let id = UserId::new(raw);
                (id, User::from_draft(id, draft))
            })
            .collect();
        let last_id = users.keys().next_back().map_or(0, |id| id.get());
        Self {
            users: RwLock::new(users),
            last_id: AtomicU64::new(last_id),
        }
    }

    /// Store holding the two sample users the service starts with.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UserId;
    /// use user_registry::domain::ports::UserStore;
    /// use user_registry::outbound::memory::InMemoryUserStore;
    ///
    /// let store = InMemoryUserStore::with_sample_users();
    /// let jane = store.get(UserId::new(2)).expect("sample user");
    /// assert_eq!(jane.name(), "Jane Smith");
    /// ```
    #[must_use]
    pub fn with_sample_users() -> Self {
        Self::seeded([
            UserDraft::new("John Doe", "john@example.com"),
            UserDraft::new("Jane Smith", "jane@example.com"),
        ])
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<UserId, User>>, UserStoreError> {
        self.users.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<UserId, User>>, UserStoreError> {
        self.users.write().map_err(poisoned)
    }
}

fn poisoned<T>(err: PoisonError<T>) -> UserStoreError {
    error!(error = %err, "user store lock poisoned");
    UserStoreError::unavailable(err.to_string())
}

impl UserStore for InMemoryUserStore {
    fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: UserId) -> Result<User, UserStoreError> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| UserStoreError::not_found(id))
    }

    fn create(&self, draft: UserDraft) -> Result<User, UserStoreError> {
        let mut users = self.write()?;
        let id = UserId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let user = User::from_draft(id, draft);
        users.insert(id, user.clone());
        debug!(user_id = %id, "user created");
        Ok(user)
    }

    fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError> {
        let mut users = self.write()?;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| UserStoreError::not_found(id))?;
        user.apply(draft);
        debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> Result<bool, UserStoreError> {
        let removed = self.write()?.remove(&id).is_some();
        debug!(user_id = %id, removed, "user delete requested");
        Ok(removed)
    }
}
