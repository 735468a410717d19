//! User registry library modules.
//!
//! An in-memory user registry served over HTTP. Every non-2xx response
//! carries the same JSON error envelope, and undeclared failures can be filed
//! as GitHub issues without delaying the response.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{ErrorReporting, Trace};
