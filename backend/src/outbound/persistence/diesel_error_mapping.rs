//! Translation of pool and Diesel failures into [`UserStoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserStoreError;

use super::pool::PoolError;

/// Pool failures mean the database could not be reached.
pub(super) fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.message())
}

/// Map a Diesel failure, logging the driver detail at debug level.
///
/// A unique violation surfaces as [`UserStoreError::DuplicateEmail`] for
/// `email` when one is supplied; the `users` table has no other unique key
/// besides the primary key, which is generated per insert.
pub(super) fn map_diesel_error(error: DieselError, email: Option<&str>) -> UserStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match (error, email) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(email)) => {
            UserStoreError::duplicate_email(email)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _)
        | (DieselError::BrokenTransactionManager, _) => {
            UserStoreError::connection("database connection error")
        }
        (DieselError::QueryBuilderError(_), _) => UserStoreError::query("database query error"),
        (other, _) => UserStoreError::query(other.to_string()),
    }
}
