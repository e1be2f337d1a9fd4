//! Store bootstrap run before the listener binds.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{StoreHealth, StoreStatus, UserStoreError};
use crate::outbound::persistence::{
    DbPool, DieselUserStore, PoolConfig, PoolError, run_pending_migrations,
};
use crate::settings::SettingsError;

/// Failures that stop the service before it serves traffic.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration sources could not be read.
    #[error("failed to load configuration: {0}")]
    Config(String),
    /// Configuration is missing or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Schema migrations could not be applied.
    #[error("database migration failed: {0}")]
    Migration(#[source] UserStoreError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The database did not answer the startup probe.
    #[error("database is unreachable")]
    Unreachable,
    /// The blocking migration task did not complete.
    #[error("migration task failed: {0}")]
    Blocking(String),
    /// The listener could not be started.
    #[error("failed to start HTTP server: {0}")]
    Server(#[from] std::io::Error),
}

/// Migrate the schema, build the pool, and confirm the database answers.
///
/// # Errors
///
/// Returns a [`StartupError`] naming the step that failed.
pub async fn connect_store(
    pool_config: PoolConfig,
    clock: Arc<dyn Clock>,
) -> Result<DieselUserStore, StartupError> {
    info!("connecting to database");
    let database_url = pool_config.database_url().to_owned();
    web::block(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| StartupError::Blocking(err.to_string()))?
        .map_err(StartupError::Migration)?;

    let pool = DbPool::new(pool_config).await?;
    let store = DieselUserStore::new(pool, clock);
    match store.status().await {
        StoreStatus::Connected => {
            info!("connected to database");
            Ok(store)
        }
        StoreStatus::Disconnected => Err(StartupError::Unreachable),
    }
}
