//! Dynamically-shaped input values.
//!
//! HTTP hands the pipeline loosely-typed data: query-string parsing produces
//! strings, arrays of strings and nested maps (repeated keys become arrays,
//! bracket syntax becomes maps), while JSON bodies arrive as arbitrary parsed
//! values. [`Value`] is the single tagged union both are folded into, so the
//! rest of the pipeline can match on shape instead of probing it.
//!
//! ```rust
//! use marquee_schema::Value;
//!
//! let raw: Value = serde_json::json!({ "page": "2", "movies": ["1", "abc"] }).into();
//! let map = raw.as_map().unwrap();
//! assert_eq!(map["page"].as_str(), Some("2"));
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use crate::numeric::NumericFilter;

/// An ordered field map, preserving the order keys appeared in the input.
pub type ValueMap = IndexMap<SmolStr, Value>;

/// A loosely-typed value flowing through the validation pipeline.
///
/// Raw input starts as one of the JSON-shaped variants; primitive transforms
/// may rewrite it in place or coerce it into [`Numeric`](Value::Numeric).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// List of values.
    List(Vec<Value>),
    /// Nested map of values.
    Map(ValueMap),
    /// A coerced numeric range filter.
    Numeric(NumericFilter),
}

impl Value {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer (or an integral float).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Get the numeric content of an integer or float value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the field map, if this is a map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the coerced numeric filter, if this value has been through
    /// numeric-filter coercion.
    pub fn as_numeric(&self) -> Option<&NumericFilter> {
        match self {
            Self::Numeric(filter) => Some(filter),
            _ => None,
        }
    }

    /// Render a scalar the way query-string normalization stringifies it.
    ///
    /// Lists and maps have no scalar rendering and return `None`.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) | Self::Numeric(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (SmolStr::new(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_shapes() {
        let value: Value = serde_json::json!({
            "title": "coco",
            "genre": ["7"],
            "age": { "gte": "10" },
            "rating": 4.5,
            "flag": true,
            "missing": null,
        })
        .into();

        let map = value.as_map().unwrap();
        assert_eq!(map["title"], Value::String("coco".into()));
        assert_eq!(map["genre"], Value::List(vec!["7".into()]));
        assert_eq!(
            map["age"].as_map().unwrap()["gte"],
            Value::String("10".into())
        );
        assert_eq!(map["rating"], Value::Float(4.5));
        assert_eq!(map["flag"], Value::Bool(true));
        assert!(map["missing"].is_null());
    }

    #[test]
    fn test_as_int_accepts_integral_floats() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Float(7.0).as_int(), Some(7));
        assert_eq!(Value::Float(7.5).as_int(), None);
        assert_eq!(Value::String("7".into()).as_int(), None);
    }

    #[test]
    fn test_scalar_string_rendering() {
        assert_eq!(Value::from("x").to_scalar_string().as_deref(), Some("x"));
        assert_eq!(Value::Int(3).to_scalar_string().as_deref(), Some("3"));
        assert_eq!(Value::Bool(true).to_scalar_string().as_deref(), Some("true"));
        assert_eq!(Value::List(vec![]).to_scalar_string(), None);
    }
}
