//! Primitive transforms.
//!
//! Small, named, composable operations applied to a single field before its
//! constraints run. Each is a pure `Value -> Value` function with no I/O, and
//! each is idempotent: re-normalizing an already-normalized value is a no-op.
//! A field rule declares its transforms in order; constraints always see the
//! post-transform value (trim before length checks, canonicalize before the
//! email format check).

use crate::email::normalize_email;
use crate::numeric::NumericFilter;
use crate::value::Value;

/// A single normalization step in a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Trim surrounding whitespace from a string value.
    Trim,
    /// Canonicalize an email address.
    NormalizeEmail,
    /// Collapse a query value to one string: lists contribute their first
    /// element, scalars are stringified.
    FirstScalar,
    /// Coerce into a [`NumericFilter`] (lenient, sentinel on parse failure).
    NumericFilter,
    /// Coerce into a single id: array-first, digit strings parse, anything
    /// else becomes null.
    IdOrNull,
    /// Coerce into a list of ids, each entry id-or-null.
    IdList,
    /// Normalize a sort keyword: anything but `DESC` becomes `ASC`.
    SortDirection,
}

impl Transform {
    /// Name of this transform (for logging).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trim => "trim",
            Self::NormalizeEmail => "normalize_email",
            Self::FirstScalar => "first_scalar",
            Self::NumericFilter => "numeric_filter",
            Self::IdOrNull => "id_or_null",
            Self::IdList => "id_list",
            Self::SortDirection => "sort_direction",
        }
    }

    /// Apply this transform to a value.
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Self::Trim => match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other,
            },
            Self::NormalizeEmail => match value {
                Value::String(s) => match normalize_email(&s) {
                    Some(normalized) => Value::String(normalized),
                    None => Value::String(s),
                },
                other => other,
            },
            Self::FirstScalar => first_scalar(value),
            Self::NumericFilter => Value::Numeric(NumericFilter::coerce(&value)),
            Self::IdOrNull => match value {
                Value::List(items) => match items.into_iter().next() {
                    Some(first) => id_leaf(first),
                    None => Value::Null,
                },
                other => id_leaf(other),
            },
            Self::IdList => match value {
                Value::List(items) => Value::List(items.into_iter().map(id_leaf).collect()),
                scalar => Value::List(vec![id_leaf(scalar)]),
            },
            Self::SortDirection => {
                let keyword = value.to_scalar_string().unwrap_or_default();
                if keyword.eq_ignore_ascii_case("DESC") {
                    Value::String("DESC".to_string())
                } else {
                    Value::String("ASC".to_string())
                }
            }
        }
    }
}

/// Query-param string normalization: `?k=a&k=b` parses as a list, and only
/// the first mention counts; scalars are stringified.
fn first_scalar(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::List(items) => match items.into_iter().next() {
            Some(first) => match first.to_scalar_string() {
                Some(s) => Value::String(s),
                None => first,
            },
            None => Value::String(String::new()),
        },
        other => match other.to_scalar_string() {
            Some(s) => Value::String(s),
            None => other,
        },
    }
}

/// One id leaf: integers pass through, digit strings parse, everything else
/// is the match-nothing null.
fn id_leaf(value: Value) -> Value {
    match value {
        Value::Int(i) => Value::Int(i),
        Value::Float(f) if f.fract() == 0.0 => Value::Int(f as i64),
        Value::String(s) => match s.parse::<i64>() {
            Ok(id) => Value::Int(id),
            Err(_) => Value::Null,
        },
        _ => Value::Null,
    }
}
