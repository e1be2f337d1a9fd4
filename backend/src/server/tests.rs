//! Tests for the assembled application.

use actix_web::http::StatusCode;
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CACHE_CONTROL, ORIGIN,
};
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::inbound::http::test_utils::{state_over, test_store};
use crate::middleware::TRACE_ID_HEADER;
use crate::test_support::valid_registration_fields;

#[fixture]
fn deps() -> AppDependencies {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(state_over(test_store())),
        origin_policy: OriginPolicy::new(
            vec!["http://localhost:5173".to_owned()],
            vec![".netlify.app".to_owned()],
        ),
    }
}

#[rstest]
#[case("/nope")]
#[case("/api/unknown")]
#[case("/api/users/a/b")]
#[actix_web::test]
async fn unmatched_routes_get_json_not_found(deps: AppDependencies, #[case] uri: &str) {
    let app = actix_test::init_service(build_app(deps)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(body, json!({"success": false, "message": "Route not found"}));
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_id(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header");
    assert!(Uuid::parse_str(header).is_ok());
}

#[rstest]
#[actix_web::test]
async fn root_reports_running_and_connected(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let body: Value =
        actix_test::call_and_read_body_json(&app, actix_test::TestRequest::get().uri("/").to_request())
            .await;

    assert_eq!(body["message"], "Registration API is running");
    assert_eq!(body["storeStatus"], "Connected");
    assert_eq!(body["timestamp"], "2026-10-19T09:30:00Z");
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn probes_are_served(deps: AppDependencies, #[case] uri: &str) {
    let app = actix_test::init_service(build_app(deps)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn registration_round_trip_through_app(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .insert_header((ORIGIN, "https://preview.netlify.app"))
            .set_json(valid_registration_fields())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("https://preview.netlify.app")
    );

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;
    assert_eq!(listed["success"], true);
    assert_eq!(listed["users"][0]["email"], "jo@example.com");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_envelope(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(body, json!({"success": false, "message": "Invalid JSON payload"}));
}

#[rstest]
#[actix_web::test]
async fn disallowed_preflight_is_answered_without_cors_headers(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/users")
            .insert_header((ORIGIN, "https://evil.example"))
            .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert!(response.headers().get(TRACE_ID_HEADER).is_some());
}

#[rstest]
#[actix_web::test]
async fn bare_error_responses_use_envelope(deps: AppDependencies) {
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        ..deps
    };
    let app = actix_test::init_service(build_app(deps)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(
        body,
        json!({"success": false, "message": "Something went wrong!", "error": "Internal server error"})
    );
}
