//! Sort order types.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order.
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    /// Parse a normalized sort keyword; anything but `DESC` sorts ascending.
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("DESC") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One column to order by, with its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByField {
    /// Column to sort on.
    pub column: Cow<'static, str>,
    /// Direction.
    pub order: SortOrder,
}

impl OrderByField {
    /// Create an order-by field.
    pub fn new(column: impl Into<Cow<'static, str>>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Ascending order on a column.
    pub fn asc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Descending order on a column.
    pub fn desc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Desc)
    }

    /// Render as an `ORDER BY` fragment.
    pub fn to_sql(&self) -> String {
        format!("{} {}", crate::filter::quote_ident(&self.column), self.order)
    }
}
