//! # marquee-api
//!
//! Per-resource request-to-query pipelines for the marquee movies backend.
//!
//! Each endpoint input is described by a static schema table and validated
//! into a typed DTO; the list endpoints additionally compile into an ordered
//! predicate list plus pagination bounds for the storage layer:
//!
//! ```text
//! raw query/body -> ObjectSchema::validate -> typed DTO -> Predicate list + PageRequest
//! ```
//!
//! ## Example
//!
//! ```rust
//! use marquee_api::characters::CharacterFilter;
//! use marquee_schema::Value;
//!
//! let raw: Value = serde_json::json!({
//!     "name": "mulan",
//!     "age": { "gte": "10" },
//!     "page": "2",
//! })
//! .into();
//!
//! let filter = CharacterFilter::from_query(&raw).unwrap();
//! let predicates = filter.compile();
//! assert_eq!(predicates.len(), 2);
//! assert_eq!(filter.page.offset(), 50);
//! ```

pub mod auth;
pub mod characters;
pub mod movies;
pub mod params;

pub use auth::{Login, Register};
pub use characters::{CharacterFilter, CreateCharacter, UpdateCharacter};
pub use movies::{
    AddMovieCharacter, CreateMovie, MovieFilter, RemoveMovieCharacter, UpdateMovie,
};
pub use params::IdParam;
