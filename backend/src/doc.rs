//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user CRUD endpoints, the health probes, and the
//! `User`, `UserDraft` and `ErrorEnvelope` schemas. The document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{User, UserDraft};
use crate::inbound::http::ErrorEnvelope;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "In-memory user registry with a uniform JSON error envelope.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, UserDraft, ErrorEnvelope)),
    tags(
        (name = "users", description = "Registering and managing users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
