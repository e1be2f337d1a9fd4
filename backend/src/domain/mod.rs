//! Domain primitives, field rules, and registration use-cases.
//!
//! Purpose: define the user entity, the single canonical field-rule table,
//! and the services inbound adapters call. Types here stay transport
//! agnostic; HTTP concerns live under `inbound::http`.
//!
//! Public surface:
//! - Error / ErrorCode / FieldError: failure envelope and its categories.
//! - User / UserId / NewUser: the registered user and its validated input.
//! - validate_registration: the field-rule table entry point.
//! - UserRegistrationService: create, list, and delete orchestration.

pub mod error;
pub mod ports;
pub mod registration;
pub mod user;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorEnvelope, FieldError};
pub use self::registration::UserRegistrationService;
pub use self::user::{NewUser, User, UserId, UserIdError};
pub use self::validation::{RegistrationPayload, validate_registration};
