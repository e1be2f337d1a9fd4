//! Schema migrations embedded at compile time from `backend/migrations`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::UserStoreError;

/// Migrations shipped with the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration to the database at `database_url`.
///
/// Uses a blocking connection; call from `spawn_blocking` inside a runtime.
///
/// # Errors
///
/// Returns [`UserStoreError::Connection`] when the database cannot be reached
/// and [`UserStoreError::Query`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<(), UserStoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| UserStoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserStoreError::query(format!("migration: {err}")))?;
    info!(applied = applied.len(), "database migrations up to date");
    Ok(())
}
