//! Description of an undeclared failure.
//!
//! An [`UnexpectedFailure`] is captured at the point where a handler gives up
//! on an error it has no declared mapping for. It keeps only owned text so it
//! can be moved onto a detached reporting task.

use std::any::Any;
use std::backtrace::Backtrace;
use std::error::Error as StdError;

const PANIC_KIND: &str = "panic";

/// Snapshot of an undeclared failure: its type, message and trace text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedFailure {
    kind: String,
    message: Option<String>,
    trace: String,
}

impl UnexpectedFailure {
    /// Capture a failure from an error value.
    ///
    /// The trace holds the error's source chain followed by a backtrace of the
    /// capturing thread.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UnexpectedFailure;
    ///
    /// let err = std::io::Error::other("disk on fire");
    /// let failure = UnexpectedFailure::from_error(&err);
    /// assert_eq!(failure.kind(), "Error");
    /// assert_eq!(failure.message(), Some("disk on fire"));
    /// ```
    pub fn from_error<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        let message = error.to_string();
        let causes = std::iter::successors(error.source(), |&cause| cause.source())
            .map(|cause| format!("caused by: {cause}\n"))
            .collect::<String>();
        let trace = format!("{causes}{}", Backtrace::force_capture());

        Self {
            kind: short_type_name::<E>().to_owned(),
            message: (!message.trim().is_empty()).then_some(message),
            trace,
        }
    }

    /// Capture a failure from a panic payload caught while handling a request.
    ///
    /// The message is the payload text when it is a `&str` or `String`.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UnexpectedFailure;
    ///
    /// let payload = std::panic::catch_unwind(|| panic!("index out of bounds")).unwrap_err();
    /// let failure = UnexpectedFailure::from_panic(payload.as_ref());
    /// assert_eq!(failure.kind(), "panic");
    /// assert_eq!(failure.message(), Some("index out of bounds"));
    /// ```
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .filter(|text| !text.trim().is_empty());

        Self {
            kind: PANIC_KIND.to_owned(),
            message,
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Build a failure from already-rendered parts.
    pub fn new(kind: impl Into<String>, message: Option<String>, trace: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message,
            trace: trace.into(),
        }
    }

    /// Unqualified type name of the originating error.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Error message, absent when the error rendered as blank text.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Formatted source chain and backtrace.
    #[must_use]
    pub fn trace(&self) -> &str {
        self.trace.as_str()
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
