//! Domain primitives, services and ports.
//!
//! Purpose: hold the transport-agnostic core of the registry. Inbound
//! adapters translate these types into HTTP; outbound adapters implement the
//! ports.
//!
//! Public surface:
//! - User, UserDraft, UserId: registered users and their client-supplied fields.
//! - UnexpectedFailure: captured undeclared failure.
//! - IssueReport: tracker payload describing an undeclared failure.
//! - FailureReporter: best-effort issue filing service.
//! - TraceId: request-scoped correlation identifier.

pub mod failure;
pub mod failure_reporter;
pub mod issue_report;
pub mod ports;
pub mod timestamp;
pub mod trace_id;
pub mod user;

pub use self::failure::UnexpectedFailure;
pub use self::failure_reporter::{FailureReporter, ReportOutcome};
pub use self::issue_report::IssueReport;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId};
