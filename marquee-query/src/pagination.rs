//! Offset pagination with a result envelope.
//!
//! Page and limit arrive as untrusted query parameters. Unlike filter values,
//! pagination bounds must always end up as usable integers, so the lenient
//! parse falls back to defaults instead of a match-nothing sentinel: a
//! request for `?page=abc&limit=xyz` serves page 1 with the default limit.
//!
//! ```rust
//! use marquee_query::{PageRequest, Paginator};
//! use marquee_schema::Value;
//!
//! let request = PageRequest::from_raw(Some(&Value::from("2")), Some(&Value::from("2")));
//! assert_eq!((request.page(), request.limit(), request.offset()), (2, 2, 2));
//!
//! let page = Paginator::new(request).paginate(vec!["up", "brave"], 4);
//! assert_eq!(page.total_pages, 2);
//! ```

use marquee_schema::{Value, parse_numeric};
use serde::Serialize;

/// Default page number.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u64 = 50;

/// Validated pagination bounds for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create bounds from already-validated numbers; zero values fall back to
    /// the defaults.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Create bounds from raw query values.
    ///
    /// Each value goes through the lenient scalar parse (first element of a
    /// list, then numeric parse); anything non-numeric, non-positive or
    /// fractional becomes the default.
    pub fn from_raw(page: Option<&Value>, limit: Option<&Value>) -> Self {
        Self {
            page: coerce_bound(page).unwrap_or(DEFAULT_PAGE),
            limit: coerce_bound(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of rows per page.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Cap the limit; policy belongs to the caller-facing layer, so the
    /// compiler never applies this on its own.
    pub fn clamped(self, max_limit: u64) -> Self {
        Self {
            page: self.page,
            limit: self.limit.min(max_limit),
        }
    }

    /// Number of pages needed for `total` rows; zero when there are none.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// Lenient scalar parse for one pagination bound.
fn coerce_bound(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    let scalar = match value {
        Value::List(items) => items.first()?.to_scalar_string()?,
        other => other.to_scalar_string()?,
    };
    let number = parse_numeric(&scalar)?;
    if number >= 1.0 && number.fract() == 0.0 {
        Some(number as u64)
    } else {
        None
    }
}

/// Assembles the result envelope for one paginated request.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    request: PageRequest,
    path: Option<String>,
}

impl Paginator {
    /// Create a paginator for the given bounds.
    pub fn new(request: PageRequest) -> Self {
        Self {
            request,
            path: None,
        }
    }

    /// Attach the resource path used to build `previous`/`next` links.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The pagination bounds this paginator was built from.
    pub fn request(&self) -> PageRequest {
        self.request
    }

    /// Assemble the envelope from one page of rows and the total row count.
    ///
    /// Links are attached only when a path was provided and the page is not
    /// at the respective boundary.
    pub fn paginate<T>(&self, data: Vec<T>, total: u64) -> Page<T> {
        let request = self.request;
        let total_pages = request.total_pages(total);

        let link = |page: u64| {
            self.path
                .as_ref()
                .map(|path| format!("{path}?page={page}&limit={}", request.limit()))
        };
        let previous = (request.page() > 1).then(|| link(request.page() - 1)).flatten();
        let next = (request.page() < total_pages)
            .then(|| link(request.page() + 1))
            .flatten();

        tracing::debug!(
            page = request.page(),
            limit = request.limit(),
            total,
            total_pages,
            "assembled page envelope"
        );

        Page {
            data,
            total,
            total_pages,
            previous,
            next,
        }
    }
}

/// One page of results with its pagination metadata.
///
/// Constructed once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The rows of this page.
    pub data: Vec<T>,
    /// Total number of matching rows.
    pub total: u64,
    /// Number of pages at the requested limit.
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    /// Link to the previous page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Link to the next page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Number of rows in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_raw_parses_scalars() {
        let request =
            PageRequest::from_raw(Some(&Value::from("2")), Some(&Value::from("2")));
        assert_eq!(request.page(), 2);
        assert_eq!(request.limit(), 2);
        assert_eq!(request.offset(), 2);
        assert_eq!(request.total_pages(4), 2);
    }

    #[test]
    fn test_from_raw_defaults_on_garbage() {
        let request =
            PageRequest::from_raw(Some(&Value::from("abc")), Some(&Value::from("xyz")));
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), DEFAULT_LIMIT);

        let request = PageRequest::from_raw(None, None);
        assert_eq!((request.page(), request.limit()), (DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn test_from_raw_rejects_non_positive_and_fractional() {
        for bad in ["0", "-2", "1.5"] {
            let request = PageRequest::from_raw(Some(&Value::from(bad)), None);
            assert_eq!(request.page(), DEFAULT_PAGE, "expected default for {bad:?}");
        }
    }

    #[test]
    fn test_from_raw_takes_first_list_element() {
        let request = PageRequest::from_raw(Some(&Value::from(vec!["3", "9"])), None);
        assert_eq!(request.page(), 3);
    }

    #[test]
    fn test_offset_and_total_pages() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 50);
        assert_eq!(request.total_pages(100), 4);
        assert_eq!(request.total_pages(101), 5);
        assert_eq!(request.total_pages(0), 0);
    }

    #[test]
    fn test_clamped_limit() {
        let request = PageRequest::new(1, 500).clamped(100);
        assert_eq!(request.limit(), 100);
        assert_eq!(PageRequest::new(1, 20).clamped(100).limit(), 20);
    }

    #[test]
    fn test_envelope_without_path_has_no_links() {
        let page = Paginator::new(PageRequest::new(2, 2)).paginate(vec![3, 4], 5);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.previous, None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_envelope_links_at_boundaries() {
        let paginator = Paginator::new(PageRequest::new(1, 2)).with_path("/characters");
        let page = paginator.paginate(vec!["a", "b"], 6);
        assert_eq!(page.previous, None);
        assert_eq!(page.next.as_deref(), Some("/characters?page=2&limit=2"));

        let paginator = Paginator::new(PageRequest::new(3, 2)).with_path("/characters");
        let page = paginator.paginate(vec!["e", "f"], 6);
        assert_eq!(page.previous.as_deref(), Some("/characters?page=2&limit=2"));
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_envelope_serialization() {
        let paginator = Paginator::new(PageRequest::new(2, 2)).with_path("/movies");
        let page = paginator.paginate(vec!["coco"], 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": ["coco"],
                "total": 3,
                "totalPages": 2,
                "previous": "/movies?page=1&limit=2",
            })
        );
    }
}
