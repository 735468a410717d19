//! App construction and port doubles shared by the HTTP integration tests.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use mockable::DefaultClock;

use user_registry::domain::ports::{
    FiledIssue, IssueTracker, IssueTrackerError, UserStore, UserStoreError,
};
use user_registry::domain::{FailureReporter, IssueReport, User, UserDraft, UserId};
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::{configure, fallback};
use user_registry::{ErrorReporting, Trace};

/// Build the application the way the server does, minus Swagger and probes.
pub fn app(
    store: Arc<dyn UserStore>,
    reporter: Arc<FailureReporter>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(store)))
        .wrap(ErrorReporting::new(reporter))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(fallback::not_found))
}

/// Store whose every operation fails with an undeclared error.
pub struct FailingUserStore;

impl FailingUserStore {
    fn fail<T>() -> Result<T, UserStoreError> {
        Err(UserStoreError::unavailable("backing map lost"))
    }
}

impl UserStore for FailingUserStore {
    fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Self::fail()
    }

    fn get(&self, _id: UserId) -> Result<User, UserStoreError> {
        Self::fail()
    }

    fn create(&self, _draft: UserDraft) -> Result<User, UserStoreError> {
        Self::fail()
    }

    fn update(&self, _id: UserId, _draft: UserDraft) -> Result<User, UserStoreError> {
        Self::fail()
    }

    fn delete(&self, _id: UserId) -> Result<bool, UserStoreError> {
        Self::fail()
    }
}

/// Store whose listing panics part-way through, as an indexing bug would.
pub struct PanickingUserStore;

impl UserStore for PanickingUserStore {
    fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users: Vec<User> = Vec::new();
        Ok(vec![users[3].clone()])
    }

    fn get(&self, _id: UserId) -> Result<User, UserStoreError> {
        Err(UserStoreError::unavailable("not exercised"))
    }

    fn create(&self, _draft: UserDraft) -> Result<User, UserStoreError> {
        Err(UserStoreError::unavailable("not exercised"))
    }

    fn update(&self, _id: UserId, _draft: UserDraft) -> Result<User, UserStoreError> {
        Err(UserStoreError::unavailable("not exercised"))
    }

    fn delete(&self, _id: UserId) -> Result<bool, UserStoreError> {
        Err(UserStoreError::unavailable("not exercised"))
    }
}

/// Tracker that counts attempts and answers every one with a transport error.
#[derive(Default)]
pub struct UnreachableTracker {
    attempts: AtomicUsize,
}

impl UnreachableTracker {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueTracker for UnreachableTracker {
    async fn file_issue(&self, _report: &IssueReport) -> Result<FiledIssue, IssueTrackerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(IssueTrackerError::transport("connection refused"))
    }
}

/// Reporter filing through `tracker`.
pub fn reporter_for(tracker: Arc<dyn IssueTracker>) -> Arc<FailureReporter> {
    Arc::new(FailureReporter::new(
        tracker,
        vec!["copilot".to_owned()],
        Arc::new(DefaultClock),
    ))
}
