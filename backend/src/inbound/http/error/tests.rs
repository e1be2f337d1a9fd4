//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{ErrorEnvelope, FieldError};
use crate::inbound::http::test_utils::{state_over, test_store};
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

async fn envelope_of(error: Error) -> (StatusCode, ErrorEnvelope) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let envelope = serde_json::from_slice(&bytes).expect("envelope deserialises");
    (status, envelope)
}

#[rstest]
#[case(Error::validation(Vec::new()), StatusCode::BAD_REQUEST)]
#[case(Error::email_taken(), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("Error fetching users"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn validation_response_lists_field_errors() {
    let error = Error::validation(vec![FieldError::new("name", "Name is required")]);

    let (status, envelope) = envelope_of(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Validation failed");
    assert_eq!(envelope.errors, vec![FieldError::new("name", "Name is required")]);
    assert_eq!(envelope.error, None);
}

#[rstest]
#[actix_web::test]
async fn actix_errors_become_internal_failures() {
    let source = actix_web::error::ErrorBadGateway("upstream closed");

    let error = Error::from(source);
    let (status, envelope) = envelope_of(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(envelope.message, UNEXPECTED_FAILURE);
    assert_eq!(envelope.error.as_deref(), Some("upstream closed"));
}

async fn post_malformed_json(exposure: ErrorExposure) -> (StatusCode, Value) {
    let state = state_over(test_store()).with_error_exposure(exposure);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/echo",
                web::post().to(|body: web::Json<Value>| async move { HttpResponse::Ok().json(body.0) }),
            ),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn malformed_json_hides_parser_detail_by_default() {
    let (status, body) = post_malformed_json(ErrorExposure::Redacted).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("success"), Some(&Value::Bool(false)));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(INVALID_JSON)
    );
    assert!(body.get("error").is_none());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_reports_parser_detail_in_development() {
    let (status, body) = post_malformed_json(ErrorExposure::Detailed).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").and_then(Value::as_str).is_some());
}

#[rstest]
#[actix_web::test]
async fn unmatched_routes_get_not_found_envelope() {
    let app =
        actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;
    let request = actix_test::TestRequest::get().uri("/nowhere").to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({"success": false, "message": "Route not found"})
    );
}

async fn call_with_envelope_handlers(
    exposure: ErrorExposure,
    uri: &str,
) -> (StatusCode, actix_web::http::header::HeaderMap, Value) {
    let state = state_over(test_store()).with_error_exposure(exposure);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(error_envelope_handlers())
            .route(
                "/boom",
                web::get().to(|| async {
                    Err::<HttpResponse, _>(actix_web::error::ErrorInternalServerError("boom"))
                }),
            )
            .route(
                "/conflict",
                web::get().to(|| async {
                    Err::<HttpResponse, _>(actix_web::error::ErrorConflict("already there"))
                }),
            )
            .route(
                "/unavailable",
                web::get().to(|| async {
                    HttpResponse::ServiceUnavailable()
                        .insert_header(("cache-control", "no-store"))
                        .finish()
                }),
            )
            .route(
                "/missing",
                web::get().to(|| async { Error::not_found("User not found").error_response() }),
            ),
    )
    .await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let body: Value = actix_test::read_body_json(response).await;
    (status, headers, body)
}

#[rstest]
#[case(ErrorExposure::Redacted, "Internal server error")]
#[case(ErrorExposure::Detailed, "boom")]
#[actix_web::test]
async fn bare_server_errors_become_unexpected_failure_envelope(
    #[case] exposure: ErrorExposure,
    #[case] shown: &str,
) {
    let (status, _, body) = call_with_envelope_handlers(exposure, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({"success": false, "message": UNEXPECTED_FAILURE, "error": shown})
    );
}

#[rstest]
#[actix_web::test]
async fn bare_client_errors_keep_their_status() {
    let (status, _, body) = call_with_envelope_handlers(ErrorExposure::Redacted, "/conflict").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, serde_json::json!({"success": false, "message": "Conflict"}));
}

#[rstest]
#[actix_web::test]
async fn rerendered_responses_keep_other_headers() {
    let (status, headers, body) =
        call_with_envelope_handlers(ErrorExposure::Redacted, "/unavailable").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        headers.get("cache-control").and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(UNEXPECTED_FAILURE)
    );
}

#[rstest]
#[actix_web::test]
async fn json_error_responses_pass_through_unchanged() {
    let (status, _, body) = call_with_envelope_handlers(ErrorExposure::Detailed, "/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"success": false, "message": "User not found"}));
}
