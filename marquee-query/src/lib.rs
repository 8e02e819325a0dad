//! # marquee-query
//!
//! Storage-agnostic query predicates and pagination for the marquee
//! request-to-query core.
//!
//! This crate provides:
//! - The [`Predicate`] tagged union: text match, numeric range, equality and
//!   membership-subquery conditions, AND-combined in a fixed order
//! - The SQL translation contract a PostgreSQL storage collaborator follows,
//!   with positional bind parameters
//! - [`SortOrder`] and [`OrderByField`] for result ordering
//! - Lenient [`PageRequest`] parsing and the [`Page`] result envelope
//!
//! Everything here is a pure, synchronous transformation over in-memory
//! values; executing the rendered SQL is the storage layer's concern.
//!
//! ## Example
//!
//! ```rust
//! use marquee_query::{PageRequest, Predicate};
//! use marquee_schema::{NumericFilter, Value};
//!
//! let predicates = vec![
//!     Predicate::text_match("name", "mulan"),
//!     Predicate::numeric_range("age", NumericFilter::coerce(&Value::from("16"))),
//! ];
//! let (sql, params) = Predicate::and_sql(&predicates, 0);
//! assert!(sql.contains("plainto_tsquery($1)"));
//! assert_eq!(params.len(), 2);
//!
//! let bounds = PageRequest::from_raw(Some(&Value::from("2")), None);
//! assert_eq!(bounds.offset(), 50);
//! ```

pub mod filter;
pub mod pagination;
pub mod types;

pub use filter::{JoinTable, Predicate, PredicateList, SqlParam};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Page, PageRequest, Paginator};
pub use types::{OrderByField, SortOrder};
