//! Storage-agnostic query predicates.
//!
//! A compiled filter is an ordered list of [`Predicate`]s combined with
//! logical AND; an empty list matches everything. Each variant is one atomic
//! condition, decoupled from any particular query-builder API, and the fixed
//! compile order lets the storage layer line predicates up with its composite
//! indexes.
//!
//! The `to_sql` methods implement the translation contract for a PostgreSQL
//! storage collaborator: full-text search via `tsvector`, numeric ranges as
//! AND-ed comparisons behind a NOT NULL guard, membership as an `IN` over a
//! join-table subquery. Parameters are returned positionally, never spliced
//! into the SQL text.
//!
//! ```rust
//! use marquee_query::{Predicate, SqlParam};
//!
//! let predicate = Predicate::text_match("title", "lion king");
//! let (sql, params) = predicate.to_sql(0);
//! assert_eq!(sql, r#"to_tsvector("title") @@ plainto_tsquery($1)"#);
//! assert_eq!(params, vec![SqlParam::String("lion king".into())]);
//! ```

use std::fmt::Write;

use marquee_schema::{NumericFilter, NumericOp, NumericValue};
use serde::Serialize;
use smallvec::SmallVec;

/// A compiled predicate list; short in practice, so it lives inline.
pub type PredicateList = SmallVec<[Predicate; 4]>;

/// A positional bind parameter accompanying rendered SQL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    /// SQL NULL.
    Null,
    /// Integer parameter.
    Int(i64),
    /// Float parameter.
    Float(f64),
    /// String parameter.
    String(String),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Option<i64>> for SqlParam {
    fn from(v: Option<i64>) -> Self {
        match v {
            Some(id) => Self::Int(id),
            None => Self::Null,
        }
    }
}

/// A many-to-many join table, described from the filtered resource's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinTable {
    /// Relation table name.
    pub table: &'static str,
    /// Column projected back to the filtered resource.
    pub select: &'static str,
    /// Column matched against the given parent ids.
    pub matches: &'static str,
}

/// One atomic, storage-engine-agnostic filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Full-text match of a normalized query against one column.
    TextMatch {
        /// Column searched.
        column: &'static str,
        /// Already-normalized query string.
        query: String,
    },
    /// Range test over one numeric column.
    ///
    /// Every present bound applies, including the match-nothing sentinel;
    /// rows with a NULL column value are excluded even when the filter
    /// carries no bounds at all.
    NumericRange {
        /// Column tested.
        column: &'static str,
        /// The bounds.
        filter: NumericFilter,
    },
    /// Direct equality against one column; `None` compares against NULL and
    /// matches nothing, since the filterable id columns are NOT NULL.
    Equals {
        /// Column compared.
        column: &'static str,
        /// Id to compare, or the match-nothing null.
        value: Option<i64>,
    },
    /// Membership of the resource id in a set related through a join table
    /// to any of the given parent ids.
    MembershipSubquery {
        /// Column compared against the subquery (the resource id).
        column: &'static str,
        /// The relation table.
        join: JoinTable,
        /// Parent ids; null entries match no row by construction.
        ids: Vec<Option<i64>>,
    },
}

impl Predicate {
    /// Create a full-text match predicate.
    pub fn text_match(column: &'static str, query: impl Into<String>) -> Self {
        Self::TextMatch {
            column,
            query: query.into(),
        }
    }

    /// Create a numeric range predicate.
    pub fn numeric_range(column: &'static str, filter: NumericFilter) -> Self {
        Self::NumericRange { column, filter }
    }

    /// Create an equality predicate.
    pub fn equals(column: &'static str, value: Option<i64>) -> Self {
        Self::Equals { column, value }
    }

    /// Create a membership subquery predicate.
    pub fn membership(column: &'static str, join: JoinTable, ids: Vec<Option<i64>>) -> Self {
        Self::MembershipSubquery { column, join, ids }
    }

    /// The column this predicate constrains.
    pub fn column(&self) -> &'static str {
        match self {
            Self::TextMatch { column, .. }
            | Self::NumericRange { column, .. }
            | Self::Equals { column, .. }
            | Self::MembershipSubquery { column, .. } => column,
        }
    }

    /// Render this predicate as SQL with positional parameters.
    ///
    /// `param_offset` is the number of parameters already bound by the
    /// surrounding query; placeholders continue from there.
    pub fn to_sql(&self, param_offset: usize) -> (String, Vec<SqlParam>) {
        let mut params = Vec::new();
        let sql = self.render(param_offset, &mut params);
        (sql, params)
    }

    fn render(&self, param_offset: usize, params: &mut Vec<SqlParam>) -> String {
        match self {
            Self::TextMatch { column, query } => {
                params.push(SqlParam::String(query.clone()));
                format!(
                    "to_tsvector({}) @@ plainto_tsquery(${})",
                    quote_ident(column),
                    param_offset + params.len()
                )
            }

            Self::NumericRange { column, filter } => {
                let column = quote_ident(column);
                let mut sql = format!("({column} IS NOT NULL");
                for (op, bound) in filter.bounds() {
                    match bound {
                        NumericValue::Number(n) => {
                            params.push(SqlParam::Float(n));
                            let _ = write!(
                                sql,
                                " AND {column} {} ${}",
                                comparison_operator(op),
                                param_offset + params.len()
                            );
                        }
                        // Unparsable input still participates: it matches
                        // zero rows rather than being dropped.
                        NumericValue::Null => sql.push_str(" AND FALSE"),
                    }
                }
                sql.push(')');
                sql
            }

            Self::Equals { column, value } => match value {
                Some(id) => {
                    params.push(SqlParam::Int(*id));
                    format!("{} = ${}", quote_ident(column), param_offset + params.len())
                }
                None => format!("{} IS NULL", quote_ident(column)),
            },

            Self::MembershipSubquery { column, join, ids } => {
                let placeholders: Vec<String> = ids
                    .iter()
                    .map(|id| {
                        params.push(SqlParam::from(*id));
                        format!("${}", param_offset + params.len())
                    })
                    .collect();
                format!(
                    "{} IN (SELECT {} FROM {} WHERE {} IN ({}))",
                    quote_ident(column),
                    quote_ident(join.select),
                    quote_ident(join.table),
                    quote_ident(join.matches),
                    placeholders.join(", ")
                )
            }
        }
    }

    /// Render an AND-combined predicate list; an empty list matches all rows.
    pub fn and_sql(predicates: &[Predicate], param_offset: usize) -> (String, Vec<SqlParam>) {
        if predicates.is_empty() {
            return ("TRUE".to_string(), Vec::new());
        }

        let mut params = Vec::new();
        let parts: Vec<String> = predicates
            .iter()
            .map(|p| p.render(param_offset, &mut params))
            .collect();

        tracing::trace!(predicates = predicates.len(), params = params.len(), "rendered filter");
        (parts.join(" AND "), params)
    }
}

fn comparison_operator(op: NumericOp) -> &'static str {
    match op {
        NumericOp::Eq => "=",
        NumericOp::Lt => "<",
        NumericOp::Gt => ">",
        NumericOp::Lte => "<=",
        NumericOp::Gte => ">=",
    }
}

/// Quote an identifier for PostgreSQL; the schemas here use camelCase column
/// names, which would otherwise be folded to lowercase.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MOVIES_CHARACTERS: JoinTable = JoinTable {
        table: "movies-characters",
        select: "characterId",
        matches: "movieId",
    };

    #[test]
    fn test_text_match_sql() {
        let (sql, params) = Predicate::text_match("name", "mulan").to_sql(0);
        assert_eq!(sql, r#"to_tsvector("name") @@ plainto_tsquery($1)"#);
        assert_eq!(params, vec![SqlParam::String("mulan".into())]);
    }

    #[test]
    fn test_numeric_range_sql() {
        let mut filter = NumericFilter::default();
        filter.set(NumericOp::Gte, NumericValue::Number(10.0));
        filter.set(NumericOp::Lt, NumericValue::Number(40.0));

        let (sql, params) = Predicate::numeric_range("age", filter).to_sql(0);
        assert_eq!(
            sql,
            r#"("age" IS NOT NULL AND "age" < $1 AND "age" >= $2)"#
        );
        assert_eq!(params, vec![SqlParam::Float(40.0), SqlParam::Float(10.0)]);
    }

    #[test]
    fn test_numeric_range_sentinel_matches_nothing() {
        let mut filter = NumericFilter::default();
        filter.set(NumericOp::Eq, NumericValue::Null);

        let (sql, params) = Predicate::numeric_range("weight", filter).to_sql(0);
        assert_eq!(sql, r#"("weight" IS NOT NULL AND FALSE)"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_numeric_range_without_bounds_keeps_null_guard() {
        let (sql, params) =
            Predicate::numeric_range("age", NumericFilter::default()).to_sql(0);
        assert_eq!(sql, r#"("age" IS NOT NULL)"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_equals_sql() {
        let (sql, params) = Predicate::equals("genreId", Some(3)).to_sql(0);
        assert_eq!(sql, r#""genreId" = $1"#);
        assert_eq!(params, vec![SqlParam::Int(3)]);

        let (sql, params) = Predicate::equals("genreId", None).to_sql(0);
        assert_eq!(sql, r#""genreId" IS NULL"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_membership_sql() {
        let predicate =
            Predicate::membership("id", MOVIES_CHARACTERS, vec![Some(1), None, Some(3)]);
        let (sql, params) = predicate.to_sql(0);
        assert_eq!(
            sql,
            r#""id" IN (SELECT "characterId" FROM "movies-characters" WHERE "movieId" IN ($1, $2, $3))"#
        );
        assert_eq!(
            params,
            vec![SqlParam::Int(1), SqlParam::Null, SqlParam::Int(3)]
        );
    }

    #[test]
    fn test_and_sql_combines_with_offsets() {
        let mut age = NumericFilter::default();
        age.set(NumericOp::Eq, NumericValue::Number(45.0));

        let predicates = [
            Predicate::text_match("name", "mulan"),
            Predicate::numeric_range("age", age),
        ];
        let (sql, params) = Predicate::and_sql(&predicates, 2);
        assert_eq!(
            sql,
            r#"to_tsvector("name") @@ plainto_tsquery($3) AND ("age" IS NOT NULL AND "age" = $4)"#
        );
        assert_eq!(
            params,
            vec![SqlParam::String("mulan".into()), SqlParam::Float(45.0)]
        );
    }

    #[test]
    fn test_empty_predicate_list_matches_all() {
        let (sql, params) = Predicate::and_sql(&[], 0);
        assert_eq!(sql, "TRUE");
        assert!(params.is_empty());
    }
}
