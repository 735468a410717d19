//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod fallback;
pub mod health;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::{ApiError, ApiResult, ErrorEnvelope};

/// Register the `/api` scope with its extractor configuration.
///
/// Callers supply [`state::HttpState`] as app data and should install
/// [`fallback::not_found`] as the default service.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_registry::inbound::http::{configure, fallback};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(fallback::not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(fallback::json_config())
            .app_data(fallback::path_config())
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
