//! Driving port for user-mutating use-cases.
//!
//! Inbound adapters call this port to register and remove users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationPayload, User};

/// Domain use-case port for registering and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `payload`, enforce email uniqueness, and store the user.
    async fn register(&self, payload: &RegistrationPayload) -> Result<User, Error>;

    /// Remove the user identified by the raw path segment `id`.
    async fn remove(&self, id: &str) -> Result<(), Error>;
}
