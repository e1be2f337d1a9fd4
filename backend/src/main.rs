//! Backend entry-point: loads settings, connects the user store, and serves
//! the registration API until SIGINT or SIGTERM.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::UserRegistrationService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::server::{
    ServerConfig, StartupError, connect_store, create_server, release_store, shutdown_signal,
    stop_gracefully,
};
use backend::settings::AppSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run().await {
        Ok(()) => {
            info!("Server shut down gracefully");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "server failed");
            Err(std::io::Error::other(err))
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = AppSettings::load().map_err(|err| StartupError::Config(err.to_string()))?;
    let pool_config = settings.pool_config()?;
    let bind_addr = settings.bind_addr()?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(connect_store(pool_config, clock.clone()).await?);
    let service = Arc::new(UserRegistrationService::new(store.clone()));
    let http_state = HttpState::new(HttpStatePorts {
        users: service.clone(),
        users_query: service,
        store_health: store.clone(),
    })
    .with_clock(clock)
    .with_error_exposure(settings.error_exposure());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::new(bind_addr, settings.origin_policy()),
    )?;

    actix_web::rt::spawn(stop_gracefully(
        shutdown_signal(),
        server.handle(),
        health_state,
    ));
    server.await?;
    // Stopped workers release their state, leaving `store` as the last handle.
    release_store(store);
    Ok(())
}
