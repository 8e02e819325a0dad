//! Character endpoints: filter pipeline and body schemas.

use std::sync::LazyLock;

use marquee_query::{JoinTable, PageRequest, Paginator, Predicate, PredicateList};
use marquee_schema::{FieldRule, NumericFilter, ObjectSchema, ValidationResult, Value};

/// Resource path, used for pagination links.
pub const CHARACTERS_PATH: &str = "/characters";

/// The movies/characters relation table, seen from the characters side.
pub const MOVIES_CHARACTERS: JoinTable = JoinTable {
    table: "movies-characters",
    select: "characterId",
    matches: "movieId",
};

/// Query-string schema for listing characters.
static FILTER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .field(FieldRule::new("name").optional().first_scalar().trim())
        .field(FieldRule::new("age").optional().trim().numeric_filter())
        .field(FieldRule::new("weight").optional().trim().numeric_filter())
        .field(FieldRule::new("movies").optional().trim().id_list())
        .field(FieldRule::new("page").optional().trim())
        .field(FieldRule::new("limit").optional().trim())
});

fn character_body(name_required: bool) -> ObjectSchema {
    let name = FieldRule::new("name").trim().is_string().max_length(30);
    ObjectSchema::new()
        .field(if name_required { name } else { name.optional() })
        .field(
            FieldRule::new("imageUrl")
                .optional()
                .trim()
                .is_string()
                .max_length(2048)
                .is_url(),
        )
        .field(FieldRule::new("age").optional().is_int())
        .field(FieldRule::new("weight").optional().is_int())
        .field(
            FieldRule::new("history")
                .optional()
                .trim()
                .is_string()
                .max_length(1000),
        )
}

/// Body schema for creating a character.
static CREATE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| character_body(true));

/// Body schema for updating a character; every field is optional.
static UPDATE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| character_body(false));

/// Validated filter options for listing characters.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterFilter {
    /// Full-text search term for the character name.
    pub name: Option<String>,
    /// Age range filter.
    pub age: Option<NumericFilter>,
    /// Weight range filter.
    pub weight: Option<NumericFilter>,
    /// Parent movie ids; unparsable entries are match-nothing nulls.
    pub movies: Option<Vec<Option<i64>>>,
    /// Pagination bounds.
    pub page: PageRequest,
}

impl CharacterFilter {
    /// Validate a raw query record into a character filter.
    pub fn from_query(query: &Value) -> ValidationResult<Self> {
        let validated = FILTER_SCHEMA.validate(query)?;
        Ok(Self {
            name: validated.str_field("name").map(str::to_string),
            age: validated.numeric_field("age").copied(),
            weight: validated.numeric_field("weight").copied(),
            movies: validated.id_list_field("movies"),
            page: PageRequest::from_raw(validated.get("page"), validated.get("limit")),
        })
    }

    /// Compile into predicates, in the fixed name, age, weight, movies order.
    pub fn compile(&self) -> PredicateList {
        let mut predicates = PredicateList::new();

        if let Some(name) = &self.name {
            predicates.push(Predicate::text_match("name", name.clone()));
        }
        for (column, filter) in [("age", self.age), ("weight", self.weight)] {
            let Some(filter) = filter else { continue };
            if !filter.is_empty() {
                predicates.push(Predicate::numeric_range(column, filter));
            }
        }
        if let Some(movies) = &self.movies {
            if !movies.is_empty() {
                predicates.push(Predicate::membership(
                    "id",
                    MOVIES_CHARACTERS,
                    movies.clone(),
                ));
            }
        }

        tracing::debug!(predicates = predicates.len(), "compiled character filter");
        predicates
    }

    /// Paginator for this request, with links under the characters path.
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page).with_path(CHARACTERS_PATH)
    }
}

/// Validated body for creating a character.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCharacter {
    /// Character name.
    pub name: String,
    /// Portrait URL.
    pub image_url: Option<String>,
    /// Age in years.
    pub age: Option<i64>,
    /// Weight in kilograms.
    pub weight: Option<i64>,
    /// Backstory.
    pub history: Option<String>,
}

impl CreateCharacter {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = CREATE_SCHEMA.validate(body)?;
        Ok(Self {
            name: validated.str_field("name").unwrap_or_default().to_string(),
            image_url: validated.str_field("imageUrl").map(str::to_string),
            age: validated.int_field("age"),
            weight: validated.int_field("weight"),
            history: validated.str_field("history").map(str::to_string),
        })
    }
}

/// Validated body for updating a character; absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateCharacter {
    /// Character name.
    pub name: Option<String>,
    /// Portrait URL.
    pub image_url: Option<String>,
    /// Age in years.
    pub age: Option<i64>,
    /// Weight in kilograms.
    pub weight: Option<i64>,
    /// Backstory.
    pub history: Option<String>,
}

impl UpdateCharacter {
    /// Validate a raw JSON body.
    pub fn from_body(body: &Value) -> ValidationResult<Self> {
        let validated = UPDATE_SCHEMA.validate(body)?;
        Ok(Self {
            name: validated.str_field("name").map(str::to_string),
            image_url: validated.str_field("imageUrl").map(str::to_string),
            age: validated.int_field("age"),
            weight: validated.int_field("weight"),
            history: validated.str_field("history").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_schema::{NumericOp, NumericValue};
    use pretty_assertions::assert_eq;

    fn query(json: serde_json::Value) -> Value {
        json.into()
    }

    #[test]
    fn test_filter_compiles_in_schema_order() {
        let filter = CharacterFilter::from_query(&query(serde_json::json!({
            "age": { "eq": "45" },
            "weight": { "lte": "250" },
            "movies": ["1", "3"],
        })))
        .unwrap();

        let predicates = filter.compile();
        assert_eq!(predicates.len(), 3);

        let mut age = NumericFilter::default();
        age.set(NumericOp::Eq, NumericValue::Number(45.0));
        let mut weight = NumericFilter::default();
        weight.set(NumericOp::Lte, NumericValue::Number(250.0));

        assert_eq!(predicates[0], Predicate::numeric_range("age", age));
        assert_eq!(predicates[1], Predicate::numeric_range("weight", weight));
        assert_eq!(
            predicates[2],
            Predicate::membership("id", MOVIES_CHARACTERS, vec![Some(1), Some(3)])
        );
    }

    #[test]
    fn test_compile_order_ignores_input_order() {
        let a = CharacterFilter::from_query(&query(serde_json::json!({
            "name": "mulan", "age": "16",
        })))
        .unwrap();
        let b = CharacterFilter::from_query(&query(serde_json::json!({
            "age": "16", "name": "mulan",
        })))
        .unwrap();

        assert_eq!(a.compile(), b.compile());
        assert_eq!(a.compile()[0].column(), "name");
    }

    #[test]
    fn test_unparsable_movie_ids_become_nulls() {
        let filter = CharacterFilter::from_query(&query(serde_json::json!({
            "movies": ["abc", "1"],
        })))
        .unwrap();
        assert_eq!(filter.movies, Some(vec![None, Some(1)]));

        let predicates = filter.compile();
        assert_eq!(
            predicates[0],
            Predicate::membership("id", MOVIES_CHARACTERS, vec![None, Some(1)])
        );
    }

    #[test]
    fn test_empty_filter_compiles_to_nothing() {
        let filter = CharacterFilter::from_query(&query(serde_json::json!({}))).unwrap();
        assert!(filter.compile().is_empty());
        assert_eq!(filter.page, PageRequest::default());
    }

    #[test]
    fn test_unparsable_age_still_filters() {
        let filter = CharacterFilter::from_query(&query(serde_json::json!({
            "age": "old",
        })))
        .unwrap();

        let predicates = filter.compile();
        let (sql, _) = predicates[0].to_sql(0);
        assert_eq!(sql, r#"("age" IS NOT NULL AND FALSE)"#);
    }

    #[test]
    fn test_pagination_from_query_strings() {
        let filter = CharacterFilter::from_query(&query(serde_json::json!({
            "page": "2", "limit": "2",
        })))
        .unwrap();
        assert_eq!(filter.page.offset(), 2);

        let page = filter.paginator().paginate(vec!["ariel", "flounder"], 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.previous.as_deref(), Some("/characters?page=1&limit=2"));
    }

    #[test]
    fn test_create_character_valid_body() {
        let created = CreateCharacter::from_body(&query(serde_json::json!({
            "name": "  Mulan ",
            "age": 16,
            "history": "Saved the empire.",
        })))
        .unwrap();

        assert_eq!(created.name, "Mulan");
        assert_eq!(created.age, Some(16));
        assert_eq!(created.image_url, None);
    }

    #[test]
    fn test_create_character_collects_all_errors() {
        let err = CreateCharacter::from_body(&query(serde_json::json!({
            "name": "x".repeat(31),
            "imageUrl": "not a url",
            "age": "sixteen",
        })))
        .unwrap_err();

        assert_eq!(
            err.messages(),
            vec![
                "name must be shorter than or equal to 30 characters",
                "imageUrl must be a URL address",
                "age must be an integer number",
            ]
        );
    }

    #[test]
    fn test_update_character_all_optional() {
        let updated = UpdateCharacter::from_body(&query(serde_json::json!({}))).unwrap();
        assert_eq!(updated, UpdateCharacter::default());
    }
}
