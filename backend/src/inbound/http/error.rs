//! HTTP adapter mapping for domain errors.
//!
//! The domain [`Error`] stays transport agnostic; this module picks status
//! codes and renders the failure envelope for Actix handlers. It also turns
//! framework failures (unreadable JSON bodies, unmatched routes, bare actix
//! errors) into the same envelope.

use std::fmt::Display;

use actix_web::dev::ServiceResponse;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode};

use super::state::{ErrorExposure, HttpState};

/// Message for request bodies that are not a JSON object.
pub const INVALID_JSON: &str = "Invalid JSON payload";
/// Message for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "Route not found";
/// Message for framework failures with no more specific mapping.
pub const UNEXPECTED_FAILURE: &str = "Something went wrong!";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        unexpected_failure(&err)
    }
}

fn unexpected_failure(cause: &impl Display) -> Error {
    error!(error = %cause, "actix error promoted to domain error");
    Error::internal(UNEXPECTED_FAILURE).with_detail(cause.to_string())
}

fn exposure_for(req: &HttpRequest) -> ErrorExposure {
    req.app_data::<web::Data<HttpState>>()
        .map(|state| state.error_exposure)
        .unwrap_or_default()
}

/// `JsonConfig` error handler rendering unreadable bodies as a 400 envelope.
///
/// The parser message is only included when the app exposes error detail.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::error::json_error_handler;
///
/// let app = App::new().app_data(web::JsonConfig::default().error_handler(json_error_handler));
/// ```
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "request body rejected");
    let error = match exposure_for(req) {
        ErrorExposure::Detailed => Error::invalid_request(INVALID_JSON).with_detail(err.to_string()),
        ErrorExposure::Redacted => Error::invalid_request(INVALID_JSON),
    };
    let response = error.error_response();
    InternalError::from_response(err, response).into()
}

/// Middleware re-rendering non-JSON error responses as the failure envelope.
///
/// Responses already carrying JSON pass through untouched. Server errors
/// become an internal failure reading [`UNEXPECTED_FAILURE`]; client errors
/// keep their status and use the canonical reason as the message. Other
/// headers are carried over. The app's [`ErrorExposure`] decides whether the
/// cause is shown.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::error::error_envelope_handlers;
///
/// let app = App::new().wrap(error_envelope_handlers());
/// ```
pub fn error_envelope_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_error_envelope)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn render_error_envelope<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if is_json(res.headers()) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let reason = status.canonical_reason().unwrap_or(UNEXPECTED_FAILURE);
    let error = if status.is_server_error() {
        match res.response().error() {
            Some(cause) => unexpected_failure(cause),
            None => unexpected_failure(&reason),
        }
    } else {
        debug!(%status, path = res.request().path(), "bare error response re-rendered");
        Error::invalid_request(reason)
    };
    let error = exposure_for(res.request()).apply(error);
    let mut response = HttpResponse::build(status).json(error);
    for (name, value) in res.headers() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }

    let (req, _) = res.into_parts();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

/// Fallback service for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "no route matched");
    Error::not_found(ROUTE_NOT_FOUND).error_response()
}

#[cfg(test)]
mod tests;
