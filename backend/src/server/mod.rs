//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod startup;

pub use config::ServerConfig;
pub use shutdown::{release_store, shutdown_signal, stop_gracefully};
pub use startup::{StartupError, connect_store};

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::cors::OriginPolicy;
use crate::inbound::http::error::{error_envelope_handlers, json_error_handler, route_not_found};
use crate::inbound::http::health::{HealthState, live, ready, status};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, delete_user, list_users};

/// Seconds in-flight requests get to finish once shutdown starts.
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub origin_policy: OriginPolicy,
}

/// Assemble the application: tracing, CORS with its preflight gate, the
/// error envelope, JSON body handling, routes and the JSON 404 fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        origin_policy,
    } = deps;

    let api = web::scope("/api")
        .service(create_user)
        .service(list_users)
        .service(delete_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api)
        .service(status)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(route_not_found))
        .wrap(error_envelope_handlers())
        .wrap(origin_policy.middleware())
        .wrap(origin_policy.preflight_gate())
        .wrap(Trace)
}

/// Prometheus middleware serving `/metrics`.
#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("registration")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

/// Bind the listener and start serving.
///
/// OS signal handling is disabled; the caller owns shutdown through the
/// returned [`Server`]'s handle. Readiness is marked once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding fails or, with the `metrics`
/// feature, when the Prometheus registry rejects the request metrics.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        origin_policy,
    } = config;
    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        origin_policy,
    };

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "server listening");
    Ok(server)
}

#[cfg(test)]
mod tests;
