//! End-to-end behaviour of the users API over the full middleware stack.

#[path = "support/app.rs"]
mod app_support;

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use user_registry::domain::{FailureReporter, TRACE_ID_HEADER, TraceId};
use user_registry::outbound::memory::InMemoryUserStore;

#[fixture]
fn store() -> Arc<InMemoryUserStore> {
    Arc::new(InMemoryUserStore::with_sample_users())
}

async fn init_app(
    store: Arc<InMemoryUserStore>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(app_support::app(
        store,
        Arc::new(FailureReporter::disabled()),
    ))
    .await
}

async fn json_body(res: ServiceResponse<BoxBody>) -> Value {
    test::read_body_json(res).await
}

#[rstest]
#[actix_web::test]
async fn sample_users_are_listed_in_id_order(store: Arc<InMemoryUserStore>) {
    let app = init_app(store).await;

    let res = test::call_service(&app, TestRequest::get().uri("/api/users").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        json!([
            { "id": 1, "name": "John Doe", "email": "john@example.com" },
            { "id": 2, "name": "Jane Smith", "email": "jane@example.com" },
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn user_lifecycle_round_trip(store: Arc<InMemoryUserStore>) {
    let app = init_app(store).await;

    let created = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Ann", "email": "a@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let ann = json!({ "id": 3, "name": "Ann", "email": "a@x.com" });
    assert_eq!(json_body(created).await, ann);

    let fetched = test::call_service(&app, TestRequest::get().uri("/api/users/3").to_request()).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched).await, ann);

    let updated = test::call_service(
        &app,
        TestRequest::put()
            .uri("/api/users/3")
            .set_json(json!({ "name": "Ann B.", "email": "ab@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(
        json_body(updated).await,
        json!({ "id": 3, "name": "Ann B.", "email": "ab@x.com" })
    );

    let deleted =
        test::call_service(&app, TestRequest::delete().uri("/api/users/3").to_request()).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = test::call_service(&app, TestRequest::get().uri("/api/users/3").to_request()).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let envelope = json_body(gone).await;
    assert_eq!(envelope["status"], json!(404));
    assert_eq!(envelope["error"], json!("Not Found"));
    assert_eq!(envelope["message"], json!("user 3 not found"));
    assert!(envelope["timestamp"].is_string());
}

#[rstest]
#[actix_web::test]
async fn ids_are_not_reused_after_delete(store: Arc<InMemoryUserStore>) {
    let app = init_app(store).await;

    let deleted =
        test::call_service(&app, TestRequest::delete().uri("/api/users/2").to_request()).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let created = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Ann", "email": "a@x.com" }))
            .to_request(),
    )
    .await;

    assert_eq!(
        created
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/api/users/3")
    );
}

#[rstest]
#[case::get(TestRequest::get().uri("/missing"))]
#[case::wrong_method(TestRequest::patch().uri("/api/users/1"))]
#[actix_web::test]
async fn unmatched_requests_get_the_envelope(
    store: Arc<InMemoryUserStore>,
    #[case] request: TestRequest,
) {
    let app = init_app(store).await;

    let res = test::call_service(&app, request.to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let envelope = json_body(res).await;
    assert_eq!(envelope["error"], json!("Not Found"));
    assert!(
        envelope["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("no resource found for "))
    );
}

#[rstest]
#[case::success(TestRequest::get().uri("/api/users"))]
#[case::declared_failure(TestRequest::get().uri("/api/users/42"))]
#[case::malformed(TestRequest::get().uri("/api/users/x"))]
#[actix_web::test]
async fn every_response_carries_a_trace_id(
    store: Arc<InMemoryUserStore>,
    #[case] request: TestRequest,
) {
    let app = init_app(store).await;

    let res = test::call_service(&app, request.to_request()).await;

    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("trace id header");
    header.parse::<TraceId>().expect("trace id is a UUID");
}
