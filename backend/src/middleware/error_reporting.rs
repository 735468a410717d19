//! Middleware that hands undeclared handler failures to the failure reporter.
//!
//! Two kinds of failure are undeclared: a response whose error is an
//! [`ApiError::Undeclared`], and a panic unwinding out of the wrapped service.
//! A caught panic is rendered as the same 500 envelope; an existing response
//! is left untouched. Either way the failure is logged and passed to
//! [`FailureReporter::dispatch`], which files the issue on a detached task.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{FailureReporter, UnexpectedFailure};
use crate::inbound::http::ApiError;

/// Reports undeclared failures raised by wrapped services.
///
/// Wrap it inside [`crate::Trace`] so the dispatched report sees the request's
/// trace identifier.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::App;
/// use user_registry::domain::FailureReporter;
/// use user_registry::{ErrorReporting, Trace};
///
/// let reporter = Arc::new(FailureReporter::disabled());
/// let app = App::new().wrap(ErrorReporting::new(reporter)).wrap(Trace);
/// ```
#[derive(Clone)]
pub struct ErrorReporting {
    reporter: Arc<FailureReporter>,
}

impl ErrorReporting {
    /// Report through `reporter`.
    #[must_use]
    pub fn new(reporter: Arc<FailureReporter>) -> Self {
        Self { reporter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorReporting
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorReportingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorReportingMiddleware {
            service,
            reporter: Arc::clone(&self.reporter),
        }))
    }
}

/// Service wrapper produced by [`ErrorReporting`].
pub struct ErrorReportingMiddleware<S> {
    service: S,
    reporter: Arc<FailureReporter>,
}

impl<S, B> Service<ServiceRequest> for ErrorReportingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let reporter = Arc::clone(&self.reporter);
        let request = req.request().clone();
        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let failure = UnexpectedFailure::from_panic(payload.as_ref());
                return Box::pin(ready(Ok(panic_response(&reporter, request, failure))));
            }
        };
        Box::pin(async move {
            let res = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res?.map_into_boxed_body(),
                Err(payload) => {
                    let failure = UnexpectedFailure::from_panic(payload.as_ref());
                    return Ok(panic_response(&reporter, request, failure));
                }
            };
            let failure = res
                .response()
                .error()
                .and_then(|err| err.as_error::<ApiError>())
                .and_then(ApiError::failure)
                .cloned();
            if let Some(failure) = failure {
                report(&reporter, &res, failure);
            }
            Ok(res)
        })
    }
}

fn panic_response(
    reporter: &Arc<FailureReporter>,
    request: actix_web::HttpRequest,
    failure: UnexpectedFailure,
) -> ServiceResponse<BoxBody> {
    let res = ServiceResponse::from_err(ApiError::Undeclared(failure.clone()), request);
    report(reporter, &res, failure);
    res
}

fn report(
    reporter: &Arc<FailureReporter>,
    res: &ServiceResponse<BoxBody>,
    failure: UnexpectedFailure,
) {
    error!(
        method = %res.request().method(),
        path = %res.request().path(),
        kind = failure.kind(),
        message = failure.message().unwrap_or_default(),
        "undeclared failure while handling request"
    );
    reporter.dispatch(failure);
}
