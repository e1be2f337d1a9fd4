//! Registration field rules.
//!
//! A single table keyed by field drives both request validation and the
//! construction of [`NewUser`], the only input the user store accepts.
//! Each field is checked in three stages:
//!
//! 1. presence (missing, `null`, or blank after trimming is "required");
//! 2. type (anything other than a JSON string);
//! 3. content rules against the normalised value, all of which run so every
//!    violation for the field is reported.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::{FieldError, NewUser};

/// Raw registration request body.
///
/// Field values are kept untyped so missing or mistyped fields surface as
/// field violations rather than body decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct RegistrationPayload(Map<String, Value>);

impl RegistrationPayload {
    /// Wrap a decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for RegistrationPayload {
    fn from(value: Map<String, Value>) -> Self {
        Self::new(value)
    }
}

/// A content rule: a predicate over the normalised value and the message
/// reported when it fails.
#[derive(Clone, Copy)]
pub struct FieldRule {
    check: fn(&str) -> bool,
    message: &'static str,
}

impl FieldRule {
    /// Message reported when the rule fails.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Whether `value` satisfies the rule.
    pub fn accepts(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

/// Rules for one payload field.
pub struct FieldSpec {
    field: &'static str,
    required: &'static str,
    not_string: &'static str,
    normalise: fn(&str) -> String,
    rules: &'static [FieldRule],
}

impl FieldSpec {
    /// Payload key.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Content rules in evaluation order.
    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    fn check(&self, value: Option<&Value>) -> Result<String, Vec<FieldError>> {
        let raw = match value {
            None | Some(Value::Null) => return Err(vec![self.violation(self.required)]),
            Some(Value::String(raw)) => raw,
            Some(_) => return Err(vec![self.violation(self.not_string)]),
        };
        if raw.trim().is_empty() {
            return Err(vec![self.violation(self.required)]);
        }

        let normalised = (self.normalise)(raw);
        let violations: Vec<FieldError> = self
            .rules
            .iter()
            .filter(|rule| !rule.accepts(&normalised))
            .map(|rule| self.violation(rule.message))
            .collect();

        if violations.is_empty() {
            Ok(normalised)
        } else {
            Err(violations)
        }
    }

    fn violation(&self, message: &str) -> FieldError {
        FieldError::new(self.field, message)
    }
}

/// Minimum trimmed name length.
pub const NAME_MIN: usize = 2;
/// Maximum trimmed name length.
pub const NAME_MAX: usize = 50;
/// Minimum trimmed address length.
pub const ADDRESS_MIN: usize = 10;
/// Maximum trimmed address length.
pub const ADDRESS_MAX: usize = 200;

fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("field rule regex {pattern} failed to compile: {error}"))
    })
}

fn char_len_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

fn trimmed(value: &str) -> String {
    value.trim().to_owned()
}

fn trimmed_lowercase(value: &str) -> String {
    value.trim().to_lowercase()
}

fn name_length(value: &str) -> bool {
    char_len_within(value, NAME_MIN, NAME_MAX)
}

fn name_characters(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^[A-Za-z\s]+$").is_match(value)
}

fn email_shape(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII word characters only; `\w` is Unicode-aware in `regex`.
    cached_regex(
        &RE,
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .is_match(value)
}

fn contact_number(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^[0-9+\-\s()]{10,15}$").is_match(value)
}

fn address_length(value: &str) -> bool {
    char_len_within(value, ADDRESS_MIN, ADDRESS_MAX)
}

/// `name` field rules.
pub static NAME: FieldSpec = FieldSpec {
    field: "name",
    required: "Name is required",
    not_string: "Name must be a string",
    normalise: trimmed,
    rules: &[
        FieldRule {
            check: name_length,
            message: "Name must be between 2 and 50 characters",
        },
        FieldRule {
            check: name_characters,
            message: "Name may only contain letters and spaces",
        },
    ],
};

/// `email` field rules.
pub static EMAIL: FieldSpec = FieldSpec {
    field: "email",
    required: "Email is required",
    not_string: "Email must be a string",
    normalise: trimmed_lowercase,
    rules: &[FieldRule {
        check: email_shape,
        message: "Please enter a valid email",
    }],
};

/// `contactNo` field rules.
pub static CONTACT_NO: FieldSpec = FieldSpec {
    field: "contactNo",
    required: "Contact number is required",
    not_string: "Contact number must be a string",
    normalise: trimmed,
    rules: &[FieldRule {
        check: contact_number,
        message: "Please enter a valid contact number (10–15 digits)",
    }],
};

/// `address` field rules.
pub static ADDRESS: FieldSpec = FieldSpec {
    field: "address",
    required: "Address is required",
    not_string: "Address must be a string",
    normalise: trimmed,
    rules: &[FieldRule {
        check: address_length,
        message: "Address must be between 10 and 200 characters",
    }],
};

/// Every field spec, in the order violations are reported.
pub static FIELD_SPECS: [&FieldSpec; 4] = [&NAME, &EMAIL, &CONTACT_NO, &ADDRESS];

/// Validate and normalise a registration payload.
///
/// Returns the accepted [`NewUser`] or every violation found, ordered by
/// field (`name`, `email`, `contactNo`, `address`) and then by rule.
///
/// # Examples
/// ```
/// use backend::domain::{RegistrationPayload, validate_registration};
/// use serde_json::json;
///
/// let payload: RegistrationPayload = serde_json::from_value(json!({
///     "name": "Jo Ann",
///     "email": "JO@Example.com",
///     "contactNo": "123-456-7890",
///     "address": "1 Main Street, Springfield"
/// }))
/// .expect("payload is an object");
///
/// let user = validate_registration(&payload).expect("payload is valid");
/// assert_eq!(user.email(), "jo@example.com");
/// ```
pub fn validate_registration(payload: &RegistrationPayload) -> Result<NewUser, Vec<FieldError>> {
    let name = NAME.check(payload.get(NAME.field));
    let email = EMAIL.check(payload.get(EMAIL.field));
    let contact_no = CONTACT_NO.check(payload.get(CONTACT_NO.field));
    let address = ADDRESS.check(payload.get(ADDRESS.field));

    match (name, email, contact_no, address) {
        (Ok(name), Ok(email), Ok(contact_no), Ok(address)) => {
            Ok(NewUser::from_validated(name, email, contact_no, address))
        }
        (name, email, contact_no, address) => Err([name, email, contact_no, address]
            .into_iter()
            .filter_map(Result::err)
            .flatten()
            .collect()),
    }
}
