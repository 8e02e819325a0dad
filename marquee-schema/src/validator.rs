//! The validation pipeline.
//!
//! Turns an untrusted input record into a normalized [`Validated`] record, or
//! a complete list of field errors. Fields are processed independently in
//! schema order and every failure is collected; the caller gets one full
//! report per round trip, never just the first error.
//!
//! Cross-field constraints need a second pass: all fields are normalized
//! first, then rules like "must equal the password field" run against the
//! normalized set, so they compare post-transform values on both sides.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::{FieldError, ValidationFailed, ValidationResult};
use crate::numeric::NumericFilter;
use crate::rule::{FieldRule, ObjectSchema};
use crate::value::{Value, ValueMap};

/// Error-collecting validator for one input record.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `input` against `schema`.
    ///
    /// Non-map input (a JSON scalar or array body) is treated as an empty
    /// record: declared required fields will fail, which is the right answer
    /// for a client that sent the wrong shape entirely.
    pub fn validate(
        mut self,
        schema: &ObjectSchema,
        input: &Value,
    ) -> ValidationResult<Validated> {
        let empty = ValueMap::new();
        let fields = input.as_map().unwrap_or(&empty);

        tracing::debug!(
            declared = schema.fields.len(),
            received = fields.len(),
            "validating input record"
        );

        // First pass: per-field transforms, then single-field constraints.
        let mut values = ValueMap::new();
        for rule in &schema.fields {
            match fields.get(rule.name.as_str()) {
                Some(raw) => {
                    let normalized = rule
                        .transforms
                        .iter()
                        .fold(raw.clone(), |value, t| t.apply(value));
                    self.check_field(rule, &normalized);
                    values.insert(rule.name.clone(), normalized);
                }
                None => {
                    if let Some(default) = &rule.default {
                        values.insert(rule.name.clone(), default.clone());
                    } else if rule.required {
                        // A missing required field fails each of its
                        // constraints, so the report names every rule the
                        // absent value breaks.
                        self.check_field(rule, &Value::Null);
                    }
                }
            }
        }

        // Second pass: cross-field constraints against the normalized set.
        for rule in &schema.fields {
            for constraint in rule.constraints.iter().filter(|c| c.is_cross_field()) {
                let crate::rule::Constraint::EqualsField { other, message } = constraint else {
                    continue;
                };
                assert!(
                    schema.fields.iter().any(|f| f.name == *other),
                    "schema bug: `{}` compares against undeclared field `{other}`",
                    rule.name,
                );

                let own = values.get(rule.name.as_str()).unwrap_or(&Value::Null);
                let target = values.get(*other).unwrap_or(&Value::Null);
                if own != target {
                    self.errors.push(FieldError::new(rule.name.clone(), *message));
                }
            }
        }

        // Unknown fields are stripped in the standard mode, surfaced as-is
        // otherwise.
        if !schema.strip_unknown {
            for (key, value) in fields {
                if !schema.fields.iter().any(|f| f.name == *key) {
                    values.insert(key.clone(), value.clone());
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Validated { values })
        } else {
            tracing::debug!(errors = self.errors.len(), "validation failed");
            Err(ValidationFailed::new(self.errors))
        }
    }

    fn check_field(&mut self, rule: &FieldRule, value: &Value) {
        for constraint in rule.constraints.iter().filter(|c| !c.is_cross_field()) {
            if let Err(message) = constraint.check(rule.name.as_str(), value) {
                self.errors.push(FieldError::new(rule.name.clone(), message));
            }
        }
    }
}

/// A validated, normalized input record.
///
/// Field order follows the schema. The typed accessors panic on a shape
/// mismatch: the schema table fixes each field's normalized shape, so a
/// mismatch is a defect in the calling code, not bad input.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    values: ValueMap,
}

impl Validated {
    /// Get a field's normalized value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Check presence of a field.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Get a string field.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).map(|v| {
            v.as_str()
                .unwrap_or_else(|| panic!("field `{field}` is not a string (schema bug)"))
        })
    }

    /// Get an integer field.
    pub fn int_field(&self, field: &str) -> Option<i64> {
        self.get(field).map(|v| {
            v.as_int()
                .unwrap_or_else(|| panic!("field `{field}` is not an integer (schema bug)"))
        })
    }

    /// Get a numeric field (integer or float).
    pub fn number_field(&self, field: &str) -> Option<f64> {
        self.get(field).map(|v| {
            v.as_number()
                .unwrap_or_else(|| panic!("field `{field}` is not a number (schema bug)"))
        })
    }

    /// Get a coerced numeric filter field.
    pub fn numeric_field(&self, field: &str) -> Option<&NumericFilter> {
        self.get(field).map(|v| {
            v.as_numeric()
                .unwrap_or_else(|| panic!("field `{field}` is not a numeric filter (schema bug)"))
        })
    }

    /// Get an id field coerced by [`Transform::IdOrNull`](crate::Transform::IdOrNull):
    /// `Some(None)` means present-but-unparsable.
    pub fn id_field(&self, field: &str) -> Option<Option<i64>> {
        self.get(field).map(|v| match v {
            Value::Int(id) => Some(*id),
            Value::Null => None,
            _ => panic!("field `{field}` is not an id (schema bug)"),
        })
    }

    /// Get an id-list field coerced by [`Transform::IdList`](crate::Transform::IdList).
    pub fn id_list_field(&self, field: &str) -> Option<Vec<Option<i64>>> {
        self.get(field).map(|v| {
            v.as_list()
                .unwrap_or_else(|| panic!("field `{field}` is not a list (schema bug)"))
                .iter()
                .map(|item| match item {
                    Value::Int(id) => Some(*id),
                    Value::Null => None,
                    _ => panic!("field `{field}` holds a non-id entry (schema bug)"),
                })
                .collect()
        })
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into the underlying ordered map.
    pub fn into_values(self) -> IndexMap<SmolStr, Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericValue;
    use crate::rule::FieldRule;
    use pretty_assertions::assert_eq;

    fn input(json: serde_json::Value) -> Value {
        json.into()
    }

    fn character_like_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(FieldRule::new("name").optional().first_scalar().trim())
            .field(FieldRule::new("age").optional().trim().numeric_filter())
            .field(FieldRule::new("movies").optional().trim().id_list())
    }

    #[test]
    fn test_transforms_run_before_constraints() {
        let schema = ObjectSchema::new()
            .field(FieldRule::new("name").trim().is_string().min_length(4));

        // "  abc " trims to three characters, so the length check must fail.
        let err = schema
            .validate(&input(serde_json::json!({ "name": "  abc " })))
            .unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["name must be longer than or equal to 4 characters"]
        );

        let ok = schema
            .validate(&input(serde_json::json!({ "name": "  abcd " })))
            .unwrap();
        assert_eq!(ok.str_field("name"), Some("abcd"));
    }

    #[test]
    fn test_all_errors_collected() {
        let schema = ObjectSchema::new()
            .field(FieldRule::new("title").is_string().max_length(100))
            .field(FieldRule::new("genreId").is_int());

        let err = schema
            .validate(&input(serde_json::json!({ "title": 7, "genreId": "three" })))
            .unwrap_err();

        assert_eq!(err.count, 2);
        assert_eq!(
            err.messages(),
            vec!["title must be a string", "genreId must be an integer number"]
        );
    }

    #[test]
    fn test_missing_optional_left_absent() {
        let validated = character_like_schema()
            .validate(&input(serde_json::json!({})))
            .unwrap();
        assert!(!validated.contains("name"));
        assert!(!validated.contains("age"));
    }

    #[test]
    fn test_missing_required_reports_each_constraint() {
        let schema = ObjectSchema::new()
            .field(FieldRule::new("title").trim().is_string().max_length(100));

        let err = schema.validate(&input(serde_json::json!({}))).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "title must be a string",
                "title must be shorter than or equal to 100 characters"
            ]
        );
    }

    #[test]
    fn test_default_applied_when_missing() {
        let schema = ObjectSchema::new().field(
            FieldRule::new("order")
                .default_value("ASC")
                .first_scalar()
                .trim()
                .sort_direction(),
        );

        let validated = schema.validate(&input(serde_json::json!({}))).unwrap();
        assert_eq!(validated.str_field("order"), Some("ASC"));

        let validated = schema
            .validate(&input(serde_json::json!({ "order": ["desc"] })))
            .unwrap();
        assert_eq!(validated.str_field("order"), Some("DESC"));
    }

    #[test]
    fn test_unknown_fields_stripped_by_default() {
        let validated = character_like_schema()
            .validate(&input(serde_json::json!({ "name": "mulan", "admin": true })))
            .unwrap();
        assert!(validated.get("admin").is_none());

        let keeping = character_like_schema()
            .keep_unknown()
            .validate(&input(serde_json::json!({ "name": "mulan", "admin": true })))
            .unwrap();
        assert_eq!(keeping.get("admin"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_lenient_numeric_coercion_is_not_an_error() {
        let validated = character_like_schema()
            .validate(&input(serde_json::json!({ "age": "old", "movies": ["abc", "1"] })))
            .unwrap();

        let age = validated.numeric_field("age").unwrap();
        assert_eq!(age.eq, Some(NumericValue::Null));
        assert_eq!(
            validated.id_list_field("movies"),
            Some(vec![None, Some(1)])
        );
    }

    #[test]
    fn test_cross_field_equality() {
        let schema = ObjectSchema::new()
            .field(FieldRule::new("password").is_string())
            .field(
                FieldRule::new("passwordConfirmation")
                    .is_string()
                    .equals_field("password", "passwords do not match."),
            );

        let err = schema
            .validate(&input(serde_json::json!({
                "password": "abcDEF123!",
                "passwordConfirmation": "abcDEF123",
            })))
            .unwrap_err();
        assert_eq!(err.count, 1);
        assert_eq!(err.errors[0].field, "passwordConfirmation");
        assert_eq!(err.errors[0].message, "passwords do not match.");

        let ok = schema.validate(&input(serde_json::json!({
            "password": "abcDEF123!",
            "passwordConfirmation": "abcDEF123!",
        })));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_cross_field_compares_normalized_values() {
        // Trim runs before the comparison on both sides.
        let schema = ObjectSchema::new()
            .field(FieldRule::new("password").trim().is_string())
            .field(
                FieldRule::new("passwordConfirmation")
                    .trim()
                    .is_string()
                    .equals_field("password", "passwords do not match."),
            );

        let ok = schema.validate(&input(serde_json::json!({
            "password": "secret ",
            "passwordConfirmation": " secret",
        })));
        assert!(ok.is_ok());
    }

    #[test]
    #[should_panic(expected = "undeclared field")]
    fn test_unknown_cross_field_target_panics() {
        let schema = ObjectSchema::new().field(
            FieldRule::new("passwordConfirmation")
                .optional()
                .equals_field("paswsord", "passwords do not match."),
        );
        let _ = schema.validate(&input(serde_json::json!({})));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let schema = character_like_schema();
        let raw = input(serde_json::json!({
            "name": ["  mulan  "],
            "age": { "gte": "10", "lt": ["40"] },
            "movies": ["1", "abc", "3"],
        }));

        let once = schema.validate(&raw).unwrap();
        let again = schema
            .validate(&Value::Map(once.clone().into_values()))
            .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_non_map_input_behaves_like_empty_record() {
        let schema = ObjectSchema::new().field(FieldRule::new("title").is_string());
        let err = schema.validate(&input(serde_json::json!([1, 2]))).unwrap_err();
        assert_eq!(err.messages(), vec!["title must be a string"]);
    }
}
