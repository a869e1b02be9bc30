//! # Catalog Queries
//!
//! Pure search, filter and sort logic over books and categories.
//!
//! The API server uses the `*_matches` predicates to answer search routes.
//! The storefront's home screen uses [`BookFilter`] to narrow search results
//! locally and [`suggestions`] for the type-ahead list.
//!
//! ## Home Screen Filter Pipeline
//! ```text
//! search results (from API)
//!      │
//!      ▼
//! category filter ──► price band filter ──► stable sort ──► filtered books
//!   (optional)           (optional)          (name by default)
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{Book, Category};
use crate::{MAX_SUGGESTIONS, MIN_SUGGESTION_QUERY_LEN};

// =============================================================================
// Search Predicates
// =============================================================================

/// Case-insensitive substring test. `needle` must already be lowercase.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Book search: name or author contains the query.
pub fn book_matches(book: &Book, query: &str) -> bool {
    let q = query.to_lowercase();
    contains_folded(&book.name, &q) || contains_folded(&book.author, &q)
}

/// In-category search: the book is in `category_id` and its name, author
/// or description contains the query.
pub fn book_matches_in_category(book: &Book, query: &str, category_id: i64) -> bool {
    if book.category_id != category_id {
        return false;
    }
    let q = query.to_lowercase();
    contains_folded(&book.name, &q)
        || contains_folded(&book.author, &q)
        || contains_folded(&book.description, &q)
}

/// Search across categories: name or author contains the query, or the
/// book's category name does.
///
/// `category` is the book's own category, if it still exists.
pub fn book_matches_with_category(book: &Book, query: &str, category: Option<&Category>) -> bool {
    let q = query.to_lowercase();
    contains_folded(&book.name, &q)
        || contains_folded(&book.author, &q)
        || category.is_some_and(|c| contains_folded(&c.name, &q))
}

/// Category search: the name contains the query.
pub fn category_matches(category: &Category, query: &str) -> bool {
    contains_folded(&category.name, &query.to_lowercase())
}

// =============================================================================
// Price Range
// =============================================================================

/// Price bands offered by the home screen filter.
///
/// Bands are closed at the top: 20.00 is in `UpTo20`, 20.01 in `From20To50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// `0-20`
    UpTo20,
    /// `20-50`
    From20To50,
    /// `50-100`
    From50To100,
    /// `100+`
    Over100,
}

impl PriceRange {
    /// The key used by the filter dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::UpTo20 => "0-20",
            PriceRange::From20To50 => "20-50",
            PriceRange::From50To100 => "50-100",
            PriceRange::Over100 => "100+",
        }
    }

    /// Whether `value` falls in this band.
    pub fn contains(&self, value: Money) -> bool {
        let twenty = Money::from_cents(2_000);
        let fifty = Money::from_cents(5_000);
        let hundred = Money::from_cents(10_000);

        match self {
            PriceRange::UpTo20 => !value.is_negative() && value <= twenty,
            PriceRange::From20To50 => value > twenty && value <= fifty,
            PriceRange::From50To100 => value > fifty && value <= hundred,
            PriceRange::Over100 => value > hundred,
        }
    }
}

impl FromStr for PriceRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0-20" => Ok(PriceRange::UpTo20),
            "20-50" => Ok(PriceRange::From20To50),
            "50-100" => Ok(PriceRange::From50To100),
            "100+" => Ok(PriceRange::Over100),
            other => Err(CoreError::UnknownOption {
                kind: "price range",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Sort order for search results. All orders are ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Name,
    Author,
    Price,
    /// Oldest first. Books with unparseable dates sort last.
    PublishDate,
}

impl SortBy {
    /// Compares two books under this order.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortBy::Name => compare_text(&a.name, &b.name),
            SortBy::Author => compare_text(&a.author, &b.author),
            SortBy::Price => a.value.cmp(&b.value),
            SortBy::PublishDate => match (a.published_on(), b.published_on()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "author" => Ok(SortBy::Author),
            "price" => Ok(SortBy::Price),
            "publishDate" => Ok(SortBy::PublishDate),
            other => Err(CoreError::UnknownOption {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

/// Case-insensitive first, then exact, so the order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// Book Filter
// =============================================================================

/// Client-side filter applied to search results.
///
/// ## Example
/// ```rust
/// use bookstore_core::catalog::{BookFilter, PriceRange, SortBy};
/// use bookstore_core::money::Money;
/// use bookstore_core::types::Book;
///
/// let books = vec![
///     Book { name: "B".into(), value: Money::from_cents(1500), ..Book::default() },
///     Book { name: "A".into(), value: Money::from_cents(6000), ..Book::default() },
/// ];
/// let filter = BookFilter {
///     price_range: Some(PriceRange::UpTo20),
///     ..BookFilter::default()
/// };
/// let out = filter.apply(&books);
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].name, "B");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub category_id: Option<i64>,
    pub price_range: Option<PriceRange>,
    pub sort_by: SortBy,
}

impl BookFilter {
    /// Returns the matching books in sorted order. Ties keep input order.
    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        let mut out: Vec<Book> = books
            .iter()
            .filter(|b| self.category_id.map_or(true, |id| b.category_id == id))
            .filter(|b| self.price_range.map_or(true, |r| r.contains(b.value)))
            .cloned()
            .collect();

        out.sort_by(|a, b| self.sort_by.compare(a, b));
        out
    }
}

// =============================================================================
// Suggestions
// =============================================================================

/// Type-ahead vocabulary for book searches.
pub const BOOK_SUGGESTIONS: [&str; 10] = [
    "fiction",
    "mystery",
    "romance",
    "science fiction",
    "biography",
    "history",
    "self-help",
    "cooking",
    "travel",
    "children",
];

/// Type-ahead vocabulary for category searches.
pub const CATEGORY_SUGGESTIONS: [&str; 10] = [
    "Fiction",
    "Non-Fiction",
    "Science",
    "History",
    "Biography",
    "Children",
    "Cooking",
    "Travel",
    "Health",
    "Technology",
];

/// Up to [`MAX_SUGGESTIONS`] entries of `vocabulary` containing `query`,
/// case-insensitively. Queries shorter than [`MIN_SUGGESTION_QUERY_LEN`]
/// characters get nothing.
pub fn suggestions(vocabulary: &[&str], query: &str) -> Vec<String> {
    if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }

    let q = query.to_lowercase();
    vocabulary
        .iter()
        .filter(|s| contains_folded(s, &q))
        .take(MAX_SUGGESTIONS)
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
