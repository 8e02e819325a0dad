//! Path parameter schemas shared by the resource endpoints.

use std::sync::LazyLock;

use marquee_schema::{FieldRule, ObjectSchema, ValidationResult, Value};

/// Schema for the `:id` path param; digits only, no signs or decimals.
static ID_SCHEMA: LazyLock<ObjectSchema> =
    LazyLock::new(|| ObjectSchema::new().field(FieldRule::new("id").numeric_string(true)));

/// A validated `:id` path param.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParam {
    /// The parsed id.
    pub id: i64,
}

impl IdParam {
    /// Validate raw path params.
    pub fn from_params(params: &Value) -> ValidationResult<Self> {
        let validated = ID_SCHEMA.validate(params)?;
        Ok(Self {
            id: validated
                .str_field("id")
                .unwrap_or_default()
                .parse()
                .unwrap_or_default(),
        })
    }
}
