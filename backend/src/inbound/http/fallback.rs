//! Envelope-producing handlers for requests that never reach a user handler.
//!
//! Covers unmatched routes plus body and path extraction failures, so every
//! non-2xx response carries the standard [`ErrorEnvelope`](super::ErrorEnvelope).

use actix_web::{HttpRequest, HttpResponse, web};

use super::{ApiError, ApiResult};

/// Default service: 404 naming the unresolved resource.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiError::not_found(format!(
        "no resource found for {} {}",
        req.method(),
        req.path()
    )))
}

/// JSON extractor configuration mapping malformed bodies to declared 400s.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

/// Path extractor configuration mapping unparsable segments to declared 400s.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}
