//! Movie endpoints: filter pipeline and body schemas.

use std::sync::LazyLock;

use marquee_query::{OrderByField, PageRequest, Paginator, Predicate, PredicateList, SortOrder};
use marquee_schema::{FieldRule, ObjectSchema, ValidationResult, Value};

/// Resource path, used for pagination links.
pub const MOVIES_PATH: &str = "/movies";

/// Query-string schema for listing movies.
static FILTER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(FieldRule::new("title").optional().first_scalar().trim())
        .field(FieldRule::new("genre").optional().id_or_null())
        .field(
            FieldRule::new("order")
                .default_value("ASC")
                .first_scalar()
                .trim()
                .sort_direction(),
        )
        .field(FieldRule::new("page").optional().trim())
        .field(FieldRule::new("limit").optional().trim())
});

fn movie_body(create: bool) -> ObjectSchema {
    // title and genreId are required on create only.
    let title = FieldRule::new("title").trim().is_string().max_length(100);
    let genre = FieldRule::new("genreId").is_int();
    ObjectSchema::new()
        .field(if create { title } else { title.optional() })
        .field(
            FieldRule::new("imageUrl")
                .optional()
                .trim()
                .is_string()
                .max_length(2048)
                .is_url(),
        )
        .field(if create { genre } else { genre.optional() })
        .field(
            FieldRule::new("rating")
                .optional()
                .is_number(Some(1))
                .min(1.0)
                .max(5.0),
        )
}

/// Body schema for creating a movie.
static CREATE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| movie_body(true));

/// Body schema for updating a movie; every field is optional.
static UPDATE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| movie_body(false));

/// Body schema for attaching a character to a movie.
static ADD_CHARACTER_SCHEMA: LazyLock<ObjectSchema> =
    LazyLock::new(|| ObjectSchema::new().field(FieldRule::new("characterId").is_int()));

/// Path-params schema for detaching a character from a movie.
static REMOVE_CHARACTER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(FieldRule::new("movieId").numeric_string(true))
        .field(FieldRule::new("characterId").numeric_string(true))
});

/// Validated filter options for listing movies.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFilter {
    /// Full-text search term for the movie title.
    pub title: Option<String>,
    /// Genre id filter; `Some(None)` is the match-nothing null.
    pub genre: Option<Option<i64>>,
    /// Direction to sort the creation date by.
    pub order: SortOrder,
    /// Pagination bounds.
    pub page: PageRequest,
}

impl MovieFilter {
    /// Validate a raw query record into a movie filter.
    pub fn from_query(query: &Value) -> ValidationResult<Self> {
        let validated = FILTER_SCHEMA.validate(query)?;
        Ok(Self {
            title: validated.str_field("title").map(str::to_string),
            genre: validated.id_field("genre"),
            order: SortOrder::from_keyword(validated.str_field("order").unwrap_or("ASC")),
            page: PageRequest::from_raw(validated.get("page"), validated.get("limit")),
        })
    }

    /// Compile into predicates, in the fixed title, genre order.
    pub fn compile(&self) -> PredicateList {
        let mut predicates = PredicateList::new();

        if let Some(title) = &self.title {
            predicates.push(Predicate::text_match("title", title.clone()));
        }
        if let Some(genre) = self.genre {
            predicates.push(Predicate::equals("genreId", genre));
        }

        tracing::debug!(predicates = predicates.len(), "compiled movie filter");
        predicates
    }

    /// The `ORDER BY` column and direction for this filter.
    pub fn order_by(&self) -> OrderByField {
        OrderByField::new("createdAt", self.order)
    }

    /// Paginator for this request, with links under the movies path.
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page).with_path(MOVIES_PATH)
    }
}

/// Validated body for creating a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMovie {
    /// Movie title.
    pub title: String,
    /// Poster URL.
    pub image_url: Option<String>,
    /// Genre id.
    pub genre_id: i64,
    /// Rating from 1 to 5, at most one decimal place.
    pub rating: Option<f64>,
}

impl CreateMovie {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = CREATE_SCHEMA.validate(body)?;
        Ok(Self {
            title: validated.str_field("title").unwrap_or_default().to_string(),
            image_url: validated.str_field("imageUrl").map(str::to_string),
            genre_id: validated.int_field("genreId").unwrap_or_default(),
            rating: validated.number_field("rating"),
        })
    }
}

/// Validated body for updating a movie; absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateMovie {
    /// Movie title.
    pub title: Option<String>,
    /// Poster URL.
    pub image_url: Option<String>,
    /// Genre id.
    pub genre_id: Option<i64>,
    /// Rating from 1 to 5, at most one decimal place.
    pub rating: Option<f64>,
}

impl UpdateMovie {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = UPDATE_SCHEMA.validate(body)?;
        Ok(Self {
            title: validated.str_field("title").map(str::to_string),
            image_url: validated.str_field("imageUrl").map(str::to_string),
            genre_id: validated.int_field("genreId"),
            rating: validated.number_field("rating"),
        })
    }
}

/// Validated body for attaching a character to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddMovieCharacter {
    /// Id of the character to attach.
    pub character_id: i64,
}

impl AddMovieCharacter {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = ADD_CHARACTER_SCHEMA.validate(body)?;
        Ok(Self {
            character_id: validated.int_field("characterId").unwrap_or_default(),
        })
    }
}

/// Validated path params for detaching a character from a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveMovieCharacter {
    /// Id of the movie.
    pub movie_id: i64,
    /// Id of the character to detach.
    pub character_id: i64,
}

impl RemoveMovieCharacter {
    /// Validate raw path params.
    pub fn from_params(params: &Value) -> ValidationResult<Self> {
        let validated = REMOVE_CHARACTER_SCHEMA.validate(params)?;
        let parse = |field: &str| {
            validated
                .str_field(field)
                .unwrap_or_default()
                .parse()
                .unwrap_or_default()
        };
        Ok(Self {
            movie_id: parse("movieId"),
            character_id: parse("characterId"),
        })
    }
}
