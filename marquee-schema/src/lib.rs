//! # marquee-schema
//!
//! Declarative input validation and coercion for the marquee request-to-query
//! core.
//!
//! This crate provides:
//! - A tagged [`Value`] union for loosely-typed HTTP input (query strings and
//!   parsed JSON bodies)
//! - Primitive, composable [`Transform`]s (trim, email canonicalization,
//!   query-param normalization, numeric-filter coercion)
//! - Declarative [`ObjectSchema`] tables of per-field rules, built once and
//!   reused immutably
//! - A two-pass [`validator`] that collects every field error instead of
//!   stopping at the first
//! - The lenient [`NumericFilter`] model, where unparsable input becomes a
//!   match-nothing sentinel instead of an error
//!
//! ## Example
//!
//! ```rust
//! use marquee_schema::{FieldRule, ObjectSchema, Value};
//!
//! let schema = ObjectSchema::new()
//!     .field(FieldRule::new("email").trim().normalize_email().is_email())
//!     .field(FieldRule::new("password").is_string().min_length(8));
//!
//! let raw: Value = serde_json::json!({
//!     "email": "  User@GMail.com ",
//!     "password": "hunter2hunter2",
//! })
//! .into();
//!
//! let validated = schema.validate(&raw).unwrap();
//! assert_eq!(validated.str_field("email"), Some("user@gmail.com"));
//! ```

pub mod email;
pub mod error;
pub mod numeric;
pub mod rule;
pub mod transform;
pub mod validator;
pub mod value;

pub use error::{FieldError, ValidationFailed, ValidationResult};
pub use numeric::{NumericFilter, NumericOp, NumericValue, parse_numeric};
pub use rule::{Constraint, FieldRule, ObjectSchema};
pub use transform::Transform;
pub use validator::{Validated, Validator};
pub use value::{Value, ValueMap};
