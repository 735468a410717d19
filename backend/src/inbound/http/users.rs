//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users       {"name":"Ann","email":"a@x.com"}
//! PUT    /api/users/{id}  {"name":"Ann B.","email":"ab@x.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use tracing::info;

use crate::domain::{User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// List registered users.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list()?))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Malformed identifier", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::from(path.into_inner());
    Ok(web::Json(state.users.get(id)?))
}

/// Register a user under a server-assigned identifier.
///
/// Any `id` in the request body is ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the created user"))),
        (status = 400, description = "Malformed body", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(payload.into_inner())?;
    info!(user_id = %user.id(), "user registered");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", user.id())))
        .json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UserDraft,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Malformed identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::from(path.into_inner());
    let user = state.users.update(id, payload.into_inner())?;
    Ok(web::Json(user))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User removed"),
        (status = 400, description = "Malformed identifier", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::from(path.into_inner());
    if state.users.delete(id)? {
        info!(user_id = %id, "user removed");
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::not_found(format!("user {id} not found")))
    }
}
