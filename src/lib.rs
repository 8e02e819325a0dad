//! # Marquee
//!
//! The request-to-query core of a movies REST backend: turning untrusted,
//! loosely-typed HTTP input into validated filter objects, and compiling
//! those into storage-agnostic query predicates with pagination bounds.
//!
//! Marquee provides:
//! - Declarative, table-driven input validation with complete error reports
//! - Lenient numeric-filter coercion, where unparsable query values become
//!   match-nothing sentinels instead of errors
//! - A tagged predicate union with a PostgreSQL rendering contract
//! - Offset pagination with a linked result envelope
//!
//! ## Quick Start
//!
//! ```rust
//! use marquee::prelude::*;
//!
//! let raw: Value = serde_json::json!({
//!     "name": "mulan",
//!     "age": { "gte": "10", "lt": "40" },
//!     "movies": ["1", "3"],
//!     "page": "2",
//!     "limit": "25",
//! })
//! .into();
//!
//! let filter = CharacterFilter::from_query(&raw).unwrap();
//! let predicates = filter.compile();
//! let (sql, params) = Predicate::and_sql(&predicates, 0);
//!
//! assert_eq!(predicates.len(), 3);
//! assert_eq!(params.len(), 5);
//! assert_eq!(filter.page.offset(), 25);
//! assert!(sql.contains(r#"to_tsvector("name")"#));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Input validation: values, transforms, rules, the validation pipeline.
pub mod schema {
    pub use marquee_schema::*;
}

/// Query predicates, sort order and pagination.
pub mod query {
    pub use marquee_query::*;
}

/// Per-resource request-to-query pipelines.
pub mod api {
    pub use marquee_api::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::{
        AddMovieCharacter, CharacterFilter, CreateCharacter, CreateMovie, IdParam, Login,
        MovieFilter, Register, RemoveMovieCharacter, UpdateCharacter, UpdateMovie,
    };
    pub use crate::query::{
        Page, PageRequest, Paginator, Predicate, PredicateList, SortOrder, SqlParam,
    };
    pub use crate::schema::{
        FieldError, FieldRule, NumericFilter, NumericValue, ObjectSchema, Validated,
        ValidationFailed, Value,
    };
}
