//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connection could not be established or was lost.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// The unique email index rejected the insert.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
}

impl UserStoreError {
    /// Construct a [`UserStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`UserStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`UserStoreError::DuplicateEmail`].
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Durable keyed storage of users.
///
/// Implementations must enforce email uniqueness themselves; the
/// [`UserStore::find_by_email`] lookup is advisory because two concurrent
/// registrations can both observe "absent" before either inserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Assign an id and timestamps, persist, and return the stored user.
    ///
    /// Returns [`UserStoreError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError>;

    /// Fetch the user registered under `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Every stored user, most recently created first.
    async fn list_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Remove the user with `id`; returns whether a record was removed.
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserStoreError>;
}
