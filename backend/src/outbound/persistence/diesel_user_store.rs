//! PostgreSQL-backed [`UserStore`] using Diesel.
//!
//! Email uniqueness is enforced by the `users_email_key` index, so two
//! concurrent inserts for one address cannot both succeed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{StoreHealth, StoreStatus, UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Upper bound on a store health check, independent of the pool's checkout
/// timeout.
pub const STATUS_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Diesel implementation of the [`UserStore`] and [`StoreHealth`] ports.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserStore {
    /// Create a store over `pool`, stamping new records with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();
        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: user.name(),
            email: user.email(),
            contact_no: user.contact_no(),
            address: user.address(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map(User::from)
            .map_err(|err| map_diesel_error(err, Some(user.email())))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(|err| map_diesel_error(err, None))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.desc(), users::id.desc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(removed > 0)
    }
}

impl DieselUserStore {
    async fn ping(&self) -> StoreStatus {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "user store health check could not check out a connection");
                return StoreStatus::Disconnected;
            }
        };

        match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => StoreStatus::Connected,
            Err(err) => {
                warn!(error = %err, "user store health check failed");
                StoreStatus::Disconnected
            }
        }
    }
}

#[async_trait]
impl StoreHealth for DieselUserStore {
    async fn status(&self) -> StoreStatus {
        match tokio::time::timeout(STATUS_CHECK_TIMEOUT, self.ping()).await {
            Ok(status) => status,
            Err(_) => {
                warn!(timeout = ?STATUS_CHECK_TIMEOUT, "user store health check timed out");
                StoreStatus::Disconnected
            }
        }
    }
}
