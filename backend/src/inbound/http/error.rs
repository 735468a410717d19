//! HTTP error envelope and the single mapping point for handler failures.
//!
//! Handlers return [`ApiResult`] and use `?`; every failure becomes an
//! [`ApiError`] that is either *declared* (it names its own status and reason)
//! or *undeclared* (anything else, always a 500). The `ResponseError`
//! implementation below is the only place either kind is rendered.

use std::error::Error as StdError;
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UnexpectedFailure;
use crate::domain::timestamp::serialize_millis;
use crate::domain::ports::UserStoreError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body returned with every non-2xx response.
///
/// `timestamp` is RFC 3339 UTC with millisecond precision; `message` is
/// serialised as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    #[serde(serialize_with = "serialize_millis")]
    #[schema(example = "2026-10-19T08:30:00.000Z")]
    pub timestamp: DateTime<Utc>,
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "user 3 not found")]
    pub message: Option<String>,
}

/// Failure raised while handling a request.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Expected failure carrying its intended status and reason.
    Declared {
        status: StatusCode,
        message: Option<String>,
    },
    /// Any other failure; rendered as a 500 and eligible for issue reporting.
    Undeclared(UnexpectedFailure),
}

impl ApiError {
    /// Declared failure with an explicit status.
    ///
    /// # Examples
    /// ```
    /// use actix_web::{ResponseError, http::StatusCode};
    /// use user_registry::inbound::http::ApiError;
    ///
    /// let err = ApiError::declared(StatusCode::CONFLICT, "already taken");
    /// assert_eq!(err.status_code(), StatusCode::CONFLICT);
    /// ```
    pub fn declared(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Declared {
            status,
            message: Some(message.into()),
        }
    }

    /// Declared `404 Not Found`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::declared(StatusCode::NOT_FOUND, message)
    }

    /// Declared `400 Bad Request`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::declared(StatusCode::BAD_REQUEST, message)
    }

    /// Undeclared failure captured from `error`.
    pub fn undeclared<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        Self::Undeclared(UnexpectedFailure::from_error(error))
    }

    /// The captured failure, for undeclared errors only.
    #[must_use]
    pub fn failure(&self) -> Option<&UnexpectedFailure> {
        match self {
            Self::Declared { .. } => None,
            Self::Undeclared(failure) => Some(failure),
        }
    }

    /// Human-readable reason, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Declared { message, .. } => message.as_deref(),
            Self::Undeclared(failure) => failure.message(),
        }
    }

    /// Envelope describing this failure, stamped with `timestamp`.
    #[must_use]
    pub fn envelope_at(&self, timestamp: DateTime<Utc>) -> ErrorEnvelope {
        let status = self.status_code();
        ErrorEnvelope {
            timestamp,
            status: status.as_u16(),
            error: reason_phrase(status),
            message: self.message().map(str::to_owned),
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared { status, message } => match message {
                Some(message) => write!(f, "{status}: {message}"),
                None => write!(f, "{status}"),
            },
            Self::Undeclared(failure) => match failure.message() {
                Some(message) => write!(f, "{}: {message}", failure.kind()),
                None => write!(f, "{}", failure.kind()),
            },
        }
    }
}

impl StdError for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Declared { status, .. } => *status,
            Self::Undeclared(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope_at(Utc::now()))
    }
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::NotFound { .. } => Self::not_found(err.to_string()),
            UserStoreError::Unavailable { .. } => Self::undeclared(&err),
        }
    }
}
