//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map the
//! [`ErrorCode`] to a status code and serialise the error as the public
//! failure envelope:
//!
//! ```text
//! {"success":false,"message":"...","errors":[{"field":"...","message":"..."}],"error":"..."}
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message used for every validation failure envelope.
pub const VALIDATION_FAILED: &str = "Validation failed";
/// Message used when an email address is already registered.
pub const EMAIL_TAKEN: &str = "Email already registered";
/// Detail surfaced in place of internal failure messages outside development.
pub const REDACTED_DETAIL: &str = "Internal server error";

/// Failure category used by adapters to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed, fails validation, or conflicts with stored data.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the service or its store.
    InternalError,
}

/// A single field-scoped violation.
///
/// # Examples
/// ```
/// use backend::domain::FieldError;
///
/// let err = FieldError::new("email", "Please enter a valid email");
/// assert_eq!(err.field(), "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "address")]
    field: String,
    #[schema(example = "Address must be between 10 and 200 characters")]
    message: String,
}

impl FieldError {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field as it appears in the request payload.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human-readable reason for the violation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Domain error payload.
///
/// `detail` carries the underlying failure text for internal errors. Inbound
/// adapters decide whether it reaches clients.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ErrorEnvelope")]
pub struct Error {
    code: ErrorCode,
    message: String,
    errors: Vec<FieldError>,
    detail: Option<String>,
}

impl Error {
    /// Create a new error without field violations or detail.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
            detail: None,
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-scoped violations, in payload field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Underlying failure detail, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Attach field-scoped violations.
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    /// Attach the underlying failure detail.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    ///
    /// let err = Error::internal("Error fetching users").with_detail("pool timed out");
    /// assert_eq!(err.detail(), Some("pool timed out"));
    /// ```
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Replace the detail of internal errors with [`REDACTED_DETAIL`].
    ///
    /// Client-correctable errors are returned unchanged.
    pub fn redacted(mut self) -> Self {
        if self.code == ErrorCode::InternalError {
            self.detail = Some(REDACTED_DETAIL.to_owned());
        }
        self
    }

    /// Payload failed one or more field rules.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::new(ErrorCode::InvalidRequest, VALIDATION_FAILED).with_errors(errors)
    }

    /// The email address belongs to an existing user.
    pub fn email_taken() -> Self {
        Self::new(ErrorCode::InvalidRequest, EMAIL_TAKEN)
            .with_errors(vec![FieldError::new("email", EMAIL_TAKEN)])
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Wire representation of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false` for failures.
    pub success: bool,
    /// Summary of the failure.
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Field-scoped violations; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    /// Failure detail; omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Error> for ErrorEnvelope {
    fn from(value: Error) -> Self {
        Self {
            success: false,
            message: value.message,
            errors: value.errors,
            error: value.detail,
        }
    }
}
