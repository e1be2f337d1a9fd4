//! Cross-origin policy for browser clients.
//!
//! Requests without an `Origin` header pass untouched. An origin is allowed
//! when it equals an allow-listed origin or ends with a trusted suffix.
//! Disallowed origins are not rejected; their responses simply carry no
//! `Access-Control-Allow-Origin` header, so browsers withhold them. That
//! includes preflights: [`PreflightGate`] answers a disallowed `OPTIONS`
//! preflight with `204 No Content` before `actix-cors` can refuse it.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_cors::Cors;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{ACCESS_CONTROL_REQUEST_METHOD, HeaderValue, ORIGIN};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

/// Exact origins and trusted suffixes accepted for cross-origin requests.
///
/// # Examples
/// ```
/// use backend::inbound::http::cors::OriginPolicy;
///
/// let policy = OriginPolicy::new(
///     vec!["http://localhost:5173".to_owned()],
///     vec![".netlify.app".to_owned()],
/// );
/// assert!(policy.allows("http://localhost:5173"));
/// assert!(policy.allows("https://preview--site.netlify.app"));
/// assert!(!policy.allows("https://evil.example"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
    trusted_suffixes: Vec<String>,
}

impl OriginPolicy {
    /// Build a policy. Blank entries are discarded.
    pub fn new(allowed: Vec<String>, trusted_suffixes: Vec<String>) -> Self {
        Self {
            allowed: non_blank(allowed),
            trusted_suffixes: non_blank(trusted_suffixes),
        }
    }

    /// Whether `origin` may read responses.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
            || self
                .trusted_suffixes
                .iter()
                .any(|suffix| origin.ends_with(suffix.as_str()))
    }

    /// Actix middleware enforcing this policy with credentials enabled.
    pub fn middleware(&self) -> Cors {
        let policy = Arc::new(self.clone());
        Cors::default()
            .allowed_origin_fn(move |origin: &HeaderValue, _req_head| {
                origin.to_str().is_ok_and(|origin| policy.allows(origin))
            })
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .block_on_origin_mismatch(false)
            .max_age(3600)
    }

    /// Middleware answering disallowed preflights; wrap it outside
    /// [`OriginPolicy::middleware`].
    pub fn preflight_gate(&self) -> PreflightGate {
        PreflightGate {
            policy: Arc::new(self.clone()),
        }
    }

    fn refuses_preflight(&self, req: &ServiceRequest) -> bool {
        if req.method() != Method::OPTIONS
            || !req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
        {
            return false;
        }
        req.headers()
            .get(ORIGIN)
            .is_some_and(|origin| !origin.to_str().is_ok_and(|origin| self.allows(origin)))
    }
}

/// Silently denies preflights from origins outside an [`OriginPolicy`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::cors::OriginPolicy;
///
/// let policy = OriginPolicy::new(vec!["http://localhost:5173".to_owned()], Vec::new());
/// let app = App::new()
///     .wrap(policy.middleware())
///     .wrap(policy.preflight_gate());
/// ```
#[derive(Clone)]
pub struct PreflightGate {
    policy: Arc<OriginPolicy>,
}

impl<S, B> Transform<S, ServiceRequest> for PreflightGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PreflightGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PreflightGateMiddleware {
            service,
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`PreflightGate`].
pub struct PreflightGateMiddleware<S> {
    service: S,
    policy: Arc<OriginPolicy>,
}

impl<S, B> Service<ServiceRequest> for PreflightGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.policy.refuses_preflight(&req) {
            debug!(path = req.path(), "preflight from disallowed origin");
            let response = req
                .into_response(HttpResponse::NoContent().finish())
                .map_into_right_body();
            return Box::pin(ready(Ok(response)));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

fn non_blank(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry.trim().to_owned())
        .filter(|entry| !entry.is_empty())
        .collect()
}
