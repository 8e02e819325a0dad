//! Field coercion rules and declarative object schemas.
//!
//! Every validated endpoint input is described by an [`ObjectSchema`]: an
//! ordered list of [`FieldRule`]s, each naming its transforms and the
//! constraints that must hold afterwards. Tables are plain values built once
//! at startup (`LazyLock`) and reused immutably; there is no reflection and
//! no per-request schema construction.
//!
//! ```rust
//! use marquee_schema::{FieldRule, ObjectSchema};
//!
//! let schema = ObjectSchema::new()
//!     .field(FieldRule::new("title").trim().is_string().max_length(100))
//!     .field(FieldRule::new("genreId").is_int());
//!
//! let input: marquee_schema::Value = serde_json::json!({ "title": " Coco ", "genreId": 3 }).into();
//! let validated = schema.validate(&input).unwrap();
//! assert_eq!(validated.str_field("title"), Some("Coco"));
//! ```

use regex_lite::Regex;
use smol_str::SmolStr;

use crate::email::is_email;
use crate::transform::Transform;
use crate::value::Value;

/// A validation constraint, checked after a field's transforms have run.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must be a string.
    IsString,
    /// Value must be an integer number.
    IsInt,
    /// Value must be a number, optionally with a decimal-place budget.
    IsNumber {
        /// Maximum number of decimal places allowed.
        max_decimal_places: Option<u32>,
    },
    /// Value must be an email address.
    IsEmail,
    /// Value must be a URL.
    IsUrl,
    /// Value must be a string of digits (optionally allowing sign/decimal).
    IsNumericString {
        /// When set, only bare digits are accepted.
        no_symbols: bool,
    },
    /// Numeric value must not be less than the bound.
    Min(f64),
    /// Numeric value must not be greater than the bound.
    Max(f64),
    /// String must be at least this many characters.
    MinLength(usize),
    /// String must be at most this many characters.
    MaxLength(usize),
    /// String must match the pattern; always carries its own message.
    Matches {
        /// Compiled pattern.
        regex: Regex,
        /// Client-facing message.
        message: &'static str,
    },
    /// Value must equal another field's normalized value (checked in the
    /// cross-field pass).
    EqualsField {
        /// The other field.
        other: &'static str,
        /// Client-facing message.
        message: &'static str,
    },
}

impl Constraint {
    /// Whether this constraint needs the whole normalized record, not just
    /// one field.
    pub fn is_cross_field(&self) -> bool {
        matches!(self, Self::EqualsField { .. })
    }

    /// Check a single-field constraint against a normalized value.
    ///
    /// Cross-field constraints are evaluated by the validator's second pass,
    /// never here.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), String> {
        let ok = match self {
            Self::IsString => matches!(value, Value::String(_)),
            Self::IsInt => value.as_int().is_some(),
            Self::IsNumber { max_decimal_places } => match value.as_number() {
                Some(n) if n.is_finite() => match max_decimal_places {
                    Some(budget) => decimal_places(n) <= *budget,
                    None => true,
                },
                _ => false,
            },
            Self::IsEmail => value.as_str().is_some_and(is_email),
            Self::IsUrl => value.as_str().is_some_and(is_url),
            Self::IsNumericString { no_symbols } => value.as_str().is_some_and(|s| {
                if *no_symbols {
                    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
                } else {
                    crate::numeric::parse_numeric(s).is_some()
                }
            }),
            Self::Min(bound) => value.as_number().is_some_and(|n| n >= *bound),
            Self::Max(bound) => value.as_number().is_some_and(|n| n <= *bound),
            Self::MinLength(len) => value
                .as_str()
                .is_some_and(|s| s.chars().count() >= *len),
            Self::MaxLength(len) => value
                .as_str()
                .is_some_and(|s| s.chars().count() <= *len),
            Self::Matches { regex, .. } => value.as_str().is_some_and(|s| regex.is_match(s)),
            Self::EqualsField { .. } => {
                unreachable!("cross-field constraints run in the second pass")
            }
        };

        if ok { Ok(()) } else { Err(self.message(field)) }
    }

    /// The client-facing message for this constraint failing on `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            Self::IsString => format!("{field} must be a string"),
            Self::IsInt => format!("{field} must be an integer number"),
            Self::IsNumber {
                max_decimal_places: Some(budget),
            } => format!("{field} must be a number with no more than {budget} decimal."),
            Self::IsNumber {
                max_decimal_places: None,
            } => format!("{field} must be a number"),
            Self::IsEmail => format!("{field} must be an email"),
            Self::IsUrl => format!("{field} must be a URL address"),
            Self::IsNumericString { .. } => format!("{field} must be a number string"),
            Self::Min(bound) => format!("{field} must not be less than {bound}"),
            Self::Max(bound) => format!("{field} must not be greater than {bound}"),
            Self::MinLength(len) => {
                format!("{field} must be longer than or equal to {len} characters")
            }
            Self::MaxLength(len) => {
                format!("{field} must be shorter than or equal to {len} characters")
            }
            Self::Matches { message, .. } | Self::EqualsField { message, .. } => {
                (*message).to_string()
            }
        }
    }
}

/// Count decimal places of a finite float via its shortest display form.
fn decimal_places(n: f64) -> u32 {
    let rendered = n.to_string();
    match rendered.split_once('.') {
        Some((_, frac)) => frac.len() as u32,
        None => 0,
    }
}

fn is_url(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https" | "ftp")
                && parsed.host_str().is_some_and(|host| host.contains('.'))
        }
        Err(_) => false,
    }
}

/// Per-field declaration: ordered transforms, then constraints.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub(crate) name: SmolStr,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) transforms: Vec<Transform>,
    pub(crate) constraints: Vec<Constraint>,
}

impl FieldRule {
    /// Create a required rule with no transforms or constraints.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
            transforms: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark the field optional: a missing value stays absent.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Mark the field optional with a default for when it is missing.
    ///
    /// The default is inserted as-is; it is expected to already be in
    /// normalized form.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    fn transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Append a constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Trim surrounding whitespace.
    pub fn trim(self) -> Self {
        self.transform(Transform::Trim)
    }

    /// Canonicalize an email address.
    pub fn normalize_email(self) -> Self {
        self.transform(Transform::NormalizeEmail)
    }

    /// Collapse a query value to a single string (first element wins).
    pub fn first_scalar(self) -> Self {
        self.transform(Transform::FirstScalar)
    }

    /// Coerce into a numeric range filter.
    pub fn numeric_filter(self) -> Self {
        self.transform(Transform::NumericFilter)
    }

    /// Coerce into a single id-or-null.
    pub fn id_or_null(self) -> Self {
        self.transform(Transform::IdOrNull)
    }

    /// Coerce into a list of ids, each id-or-null.
    pub fn id_list(self) -> Self {
        self.transform(Transform::IdList)
    }

    /// Normalize a sort keyword to `ASC`/`DESC`.
    pub fn sort_direction(self) -> Self {
        self.transform(Transform::SortDirection)
    }

    /// Require a string value.
    pub fn is_string(self) -> Self {
        self.constraint(Constraint::IsString)
    }

    /// Require an integer value.
    pub fn is_int(self) -> Self {
        self.constraint(Constraint::IsInt)
    }

    /// Require a number with at most `max_decimal_places` decimals.
    pub fn is_number(self, max_decimal_places: Option<u32>) -> Self {
        self.constraint(Constraint::IsNumber { max_decimal_places })
    }

    /// Require an email address.
    pub fn is_email(self) -> Self {
        self.constraint(Constraint::IsEmail)
    }

    /// Require a URL.
    pub fn is_url(self) -> Self {
        self.constraint(Constraint::IsUrl)
    }

    /// Require a numeric string; with `no_symbols`, digits only.
    pub fn numeric_string(self, no_symbols: bool) -> Self {
        self.constraint(Constraint::IsNumericString { no_symbols })
    }

    /// Require a minimum numeric value.
    pub fn min(self, bound: f64) -> Self {
        self.constraint(Constraint::Min(bound))
    }

    /// Require a maximum numeric value.
    pub fn max(self, bound: f64) -> Self {
        self.constraint(Constraint::Max(bound))
    }

    /// Require a minimum string length.
    pub fn min_length(self, len: usize) -> Self {
        self.constraint(Constraint::MinLength(len))
    }

    /// Require a maximum string length.
    pub fn max_length(self, len: usize) -> Self {
        self.constraint(Constraint::MaxLength(len))
    }

    /// Require the string to match a pattern, failing with `message`.
    ///
    /// Panics on an invalid pattern: schema tables are static program data,
    /// so a bad pattern is a defect, not an input error.
    pub fn matches(self, pattern: &str, message: &'static str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern {pattern:?} in schema table: {e}"));
        self.constraint(Constraint::Matches { regex, message })
    }

    /// Require equality with another field's normalized value.
    pub fn equals_field(self, other: &'static str, message: &'static str) -> Self {
        self.constraint(Constraint::EqualsField { other, message })
    }
}

/// An ordered, immutable schema for one endpoint input.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub(crate) fields: Vec<FieldRule>,
    pub(crate) strip_unknown: bool,
}

impl ObjectSchema {
    /// Create an empty schema that strips unknown fields (the standard mode).
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            strip_unknown: true,
        }
    }

    /// Append a field rule.
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Pass unknown input fields through instead of stripping them.
    pub fn keep_unknown(mut self) -> Self {
        self.strip_unknown = false;
        self
    }

    /// Declared rules, in schema order.
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Validate a raw input record against this schema.
    ///
    /// See [`crate::validator`] for the pipeline semantics.
    pub fn validate(&self, input: &Value) -> crate::error::ValidationResult<crate::Validated> {
        crate::validator::Validator::new().validate(self, input)
    }
}
