//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and failure reporting.

pub mod error_reporting;
pub mod trace;

pub use error_reporting::ErrorReporting;
pub use trace::Trace;
