//! Numeric range filters.
//!
//! Query parameters like `age` or `weight` accept either a plain scalar
//! (`?age=45`) or a range map (`?age[gte]=10&age[lt]=40`). Coercion is
//! lenient: a value that does not parse as a number becomes the
//! [`NumericValue::Null`] sentinel instead of a validation error, and that
//! sentinel later compiles into a condition matching zero rows. "Bound
//! absent" and "bound present but unparsable" are distinct states.
//!
//! ```rust
//! use marquee_schema::{NumericFilter, NumericValue, Value};
//!
//! let filter = NumericFilter::coerce(&Value::from("45"));
//! assert_eq!(filter.eq, Some(NumericValue::Number(45.0)));
//!
//! let filter = NumericFilter::coerce(&Value::from("abc"));
//! assert_eq!(filter.eq, Some(NumericValue::Null));
//! ```

use serde::Serialize;

use crate::value::Value;

/// Recognized range keys, in the fixed order bounds are reported in.
const RANGE_KEYS: [NumericOp; 5] = [
    NumericOp::Eq,
    NumericOp::Lt,
    NumericOp::Gt,
    NumericOp::Lte,
    NumericOp::Gte,
];

/// A single comparison kind inside a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericOp {
    /// Equals.
    Eq,
    /// Less than.
    Lt,
    /// Greater than.
    Gt,
    /// Less than or equal.
    Lte,
    /// Greater than or equal.
    Gte,
}

impl NumericOp {
    /// The wire key for this comparison (`eq`, `lt`, `gt`, `lte`, `gte`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
        }
    }
}

/// One bound of a numeric filter.
///
/// `Null` is the lenient-coercion sentinel: the key was present in the input
/// but its value did not parse as a number. It is not an error; it compiles
/// into a condition that matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// A parsed number.
    Number(f64),
    /// Present but unparsable input.
    Null,
}

impl NumericValue {
    /// Lenient parse: a numeric string becomes `Number`, anything else `Null`.
    pub fn parse(s: &str) -> Self {
        match parse_numeric(s) {
            Some(n) => Self::Number(n),
            None => Self::Null,
        }
    }

    /// Get the parsed number, if there is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Null => None,
        }
    }
}

impl From<f64> for NumericValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Parse a string as a number, or return `None`.
///
/// Accepts an optional leading sign, then digits with at most one decimal
/// point (`45`, `-3`, `0.5`, `.5`). This function cannot fail; callers decide
/// whether `None` means "default" (pagination) or "sentinel" (filters).
pub fn parse_numeric(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || digits.ends_with('.') {
        return None;
    }

    let mut dots = 0usize;
    for c in digits.chars() {
        match c {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => return None,
        }
    }
    if dots > 1 || digits == "." {
        return None;
    }

    s.parse().ok()
}

/// An optional range test over one numeric column.
///
/// Absent fields mean "no constraint of this kind"; a field holding
/// [`NumericValue::Null`] still participates in the compiled query and forces
/// zero matches on that bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NumericFilter {
    /// 'Equals' bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<NumericValue>,
    /// 'Less than' bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<NumericValue>,
    /// 'Greater than' bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<NumericValue>,
    /// 'Less or equal' bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<NumericValue>,
    /// 'Greater or equal' bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<NumericValue>,
}

impl NumericFilter {
    /// Coerce a raw input value into a numeric filter.
    ///
    /// - A scalar becomes `{eq}` via the lenient parse.
    /// - A list contributes its first element as the `{eq}` scalar.
    /// - A map is read key by key: the five recognized keys are coerced
    ///   independently (array-first, parse-or-sentinel), explicit nulls and
    ///   unrecognized keys are dropped.
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Numeric(filter) => *filter,
            Value::Null => Self::default(),
            Value::String(s) => Self::with_bound(NumericOp::Eq, NumericValue::parse(s)),
            Value::Int(i) => Self::with_bound(NumericOp::Eq, NumericValue::Number(*i as f64)),
            Value::Float(f) => Self::with_bound(NumericOp::Eq, NumericValue::Number(*f)),
            Value::Bool(_) => Self::with_bound(NumericOp::Eq, NumericValue::Null),
            Value::List(items) => match items.first() {
                Some(first) => Self::with_bound(NumericOp::Eq, Self::coerce_leaf(first)),
                None => Self::default(),
            },
            Value::Map(map) => {
                let mut filter = Self::default();
                for op in RANGE_KEYS {
                    let Some(raw) = map.get(op.key()) else {
                        continue;
                    };
                    if raw.is_null() {
                        continue;
                    }
                    let leaf = match raw {
                        Value::List(items) => match items.first() {
                            Some(first) => Self::coerce_leaf(first),
                            None => continue,
                        },
                        other => Self::coerce_leaf(other),
                    };
                    filter.set(op, leaf);
                }
                filter
            }
        }
    }

    /// Coerce one leaf value: numbers pass through, numeric strings parse,
    /// everything else becomes the sentinel.
    fn coerce_leaf(value: &Value) -> NumericValue {
        match value {
            Value::Int(i) => NumericValue::Number(*i as f64),
            Value::Float(f) => NumericValue::Number(*f),
            Value::String(s) => NumericValue::parse(s),
            _ => NumericValue::Null,
        }
    }

    fn with_bound(op: NumericOp, value: NumericValue) -> Self {
        let mut filter = Self::default();
        filter.set(op, value);
        filter
    }

    /// Set one bound.
    pub fn set(&mut self, op: NumericOp, value: NumericValue) {
        match op {
            NumericOp::Eq => self.eq = Some(value),
            NumericOp::Lt => self.lt = Some(value),
            NumericOp::Gt => self.gt = Some(value),
            NumericOp::Lte => self.lte = Some(value),
            NumericOp::Gte => self.gte = Some(value),
        }
    }

    /// Get one bound.
    pub fn get(&self, op: NumericOp) -> Option<NumericValue> {
        match op {
            NumericOp::Eq => self.eq,
            NumericOp::Lt => self.lt,
            NumericOp::Gt => self.gt,
            NumericOp::Lte => self.lte,
            NumericOp::Gte => self.gte,
        }
    }

    /// Check if no bound is present at all.
    pub fn is_empty(&self) -> bool {
        RANGE_KEYS.iter().all(|op| self.get(*op).is_none())
    }

    /// Iterate over present bounds in the fixed `eq, lt, gt, lte, gte` order.
    pub fn bounds(&self) -> impl Iterator<Item = (NumericOp, NumericValue)> + '_ {
        RANGE_KEYS
            .into_iter()
            .filter_map(|op| self.get(op).map(|value| (op, value)))
    }
}
