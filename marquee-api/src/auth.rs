//! Auth endpoints: login and registration body schemas.

use std::sync::LazyLock;

use marquee_schema::{FieldRule, ObjectSchema, ValidationResult, Value};

/// Body schema for logging in.
static LOGIN_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(FieldRule::new("email").trim().normalize_email().is_email())
        .field(FieldRule::new("password").is_string())
});

/// Body schema for registering; extends login with password strength rules
/// and a confirmation field that must match the normalized password.
static REGISTER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(FieldRule::new("email").trim().normalize_email().is_email())
        .field(
            FieldRule::new("password")
                .is_string()
                .min_length(8)
                .matches(
                    "[A-Z]",
                    "password must include at least one uppercase letter.",
                )
                .matches(
                    "[a-z]",
                    "password must include at least one lowercase letter.",
                )
                .matches(r"\d", "password must include at least one number.")
                .matches(
                    "[ -/:-@\\[-`{-~]",
                    "password must include at least one special character.",
                ),
        )
        .field(
            FieldRule::new("passwordConfirmation")
                .is_string()
                .equals_field("password", "passwords do not match."),
        )
});

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    /// Canonicalized email address.
    pub email: String,
    /// Password, verbatim.
    pub password: String,
}

impl Login {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = LOGIN_SCHEMA.validate(body)?;
        Ok(Self {
            email: validated.str_field("email").unwrap_or_default().to_string(),
            password: validated
                .str_field("password")
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// Validated registration data; the confirmation field is checked and then
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    /// Canonicalized email address.
    pub email: String,
    /// Password, verbatim.
    pub password: String,
}

impl Register {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = REGISTER_SCHEMA.validate(body)?;
        Ok(Self {
            email: validated.str_field("email").unwrap_or_default().to_string(),
            password: validated
                .str_field("password")
                .unwrap_or_default()
                .to_string(),
        })
    }
}
