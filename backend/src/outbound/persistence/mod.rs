//! PostgreSQL persistence for registered users.
//!
//! Built on Diesel with `diesel-async` and `bb8` pooling. Row structs and
//! table definitions stay private to this module; adapters translate them
//! into domain types and map every failure to [`UserStoreError`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use backend::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//! use mockable::DefaultClock;
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let store = DieselUserStore::new(pool, Arc::new(DefaultClock));
//! # let _ = store;
//! # Ok(())
//! # }
//! ```
//!
//! [`UserStoreError`]: crate::domain::ports::UserStoreError

mod diesel_error_mapping;
mod diesel_user_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
