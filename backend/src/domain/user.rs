//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier is not a canonical UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier stored as a UUID.
///
/// Identifiers are generated by the store when a user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("not-a-uuid").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserIdError::Invalid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised registration details that passed every field rule.
///
/// Only [`crate::domain::validate_registration`] constructs values of this
/// type, so stores that accept a `NewUser` never persist unvalidated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    contact_no: String,
    address: String,
}

impl NewUser {
    pub(crate) fn from_validated(
        name: String,
        email: String,
        contact_no: String,
        address: String,
    ) -> Self {
        Self {
            name,
            email,
            contact_no,
            address,
        }
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed, lowercased email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Trimmed contact number.
    pub fn contact_no(&self) -> &str {
        &self.contact_no
    }

    /// Trimmed postal address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Registered user.
///
/// ## Invariants
/// - Every field satisfied the registration rules when the user was created.
/// - `created_at == updated_at`; users are never modified in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(example = "Jo Ann")]
    name: String,
    #[schema(example = "jo@example.com")]
    email: String,
    #[schema(example = "123-456-7890")]
    contact_no: String,
    #[schema(example = "1 Main Street, Springfield")]
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a stored user from validated details and store-assigned
    /// metadata.
    pub(crate) fn from_new(id: UserId, details: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser {
            name,
            email,
            contact_no,
            address,
        } = details;
        Self {
            id,
            name,
            email,
            contact_no,
            address,
            created_at,
            updated_at: created_at,
        }
    }

    /// Rehydrate a user read back from persistent storage.
    pub(crate) fn restore(parts: StoredUserParts) -> Self {
        let StoredUserParts {
            id,
            name,
            email,
            contact_no,
            address,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            name,
            email,
            contact_no,
            address,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact number.
    pub fn contact_no(&self) -> &str {
        &self.contact_no
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Column values of a persisted user, used by store adapters.
pub(crate) struct StoredUserParts {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub contact_no: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
