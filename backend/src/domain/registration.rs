//! User registration use-cases.
//!
//! Each operation is a single pass: validate, perform at most one store
//! mutation, and return. Validation failures never reach the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::ports::{UserStore, UserStoreError, UsersCommand, UsersQuery};
use super::{Error, RegistrationPayload, User, UserId, validate_registration};

/// Message returned when registration hits an unexpected store failure.
pub const REGISTER_FAILED: &str = "Server error. Please try again later.";
/// Message returned when listing hits an unexpected store failure.
pub const LIST_FAILED: &str = "Error fetching users";
/// Message returned when deletion hits an unexpected store failure.
pub const DELETE_FAILED: &str = "Error deleting user";
/// Message returned when the delete target does not exist.
pub const USER_NOT_FOUND: &str = "User not found";

/// Registration service backed by a [`UserStore`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::UserRegistrationService;
/// use backend::domain::ports::UserStore;
///
/// fn build(store: Arc<dyn UserStore>) -> UserRegistrationService {
///     UserRegistrationService::new(store)
/// }
/// ```
#[derive(Clone)]
pub struct UserRegistrationService {
    store: Arc<dyn UserStore>,
}

impl UserRegistrationService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

fn store_failure(message: &'static str, err: UserStoreError) -> Error {
    error!(error = %err, context = message, "user store operation failed");
    Error::internal(message).with_detail(err.to_string())
}

#[async_trait]
impl UsersCommand for UserRegistrationService {
    async fn register(&self, payload: &RegistrationPayload) -> Result<User, Error> {
        let new_user = validate_registration(payload).map_err(|errors| {
            debug!(violations = errors.len(), "registration rejected by field rules");
            Error::validation(errors)
        })?;

        let existing = self
            .store
            .find_by_email(new_user.email())
            .await
            .map_err(|err| store_failure(REGISTER_FAILED, err))?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(Error::email_taken());
        }

        match self.store.insert(&new_user).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user registered");
                Ok(user)
            }
            // Lost a race with a concurrent registration for the same email.
            Err(UserStoreError::DuplicateEmail { .. }) => {
                debug!("registration rejected by unique email index");
                Err(Error::email_taken())
            }
            Err(err) => Err(store_failure(REGISTER_FAILED, err)),
        }
    }

    async fn remove(&self, id: &str) -> Result<(), Error> {
        let Ok(id) = UserId::new(id) else {
            debug!(raw_id = id, "delete target is not a user id");
            return Err(Error::not_found(USER_NOT_FOUND));
        };

        let removed = self
            .store
            .delete_by_id(&id)
            .await
            .map_err(|err| store_failure(DELETE_FAILED, err))?;
        if removed {
            info!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[async_trait]
impl UsersQuery for UserRegistrationService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.store
            .list_all()
            .await
            .map_err(|err| store_failure(LIST_FAILED, err))
    }
}
