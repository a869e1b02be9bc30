//! # Validation Module
//!
//! Presence checks for catalog records, plus the small normalisations the
//! API applies on the way in.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Feature controller                                           │
//! │  └── "Invalid Category" warning before a book is created               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API server (THIS MODULE)                                     │
//! │  ├── validate_book: every field present                                │
//! │  └── normalize_publish_date: YYYY-MM-DD → ISO date-time                │
//! │                                                                         │
//! │  Nothing deeper: lengths, ranges and uniqueness are not checked.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{Book, Category, DATE_FORMAT};
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Record Validators
// =============================================================================

/// Checks that every field of a new book is present.
///
/// ## Rules
/// - `name`, `author`, `description`, `publishDate` non-empty
/// - `value` greater than zero
/// - `categoryId` greater than zero
///
/// Field names in errors use the wire spelling.
///
/// ## Example
/// ```rust
/// use bookstore_core::types::Book;
/// use bookstore_core::validation::validate_book;
///
/// assert!(validate_book(&Book::default()).is_err());
/// ```
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    require_text("name", &book.name)?;
    require_text("author", &book.author)?;
    require_text("description", &book.description)?;

    if !book.value.is_positive() {
        return Err(ValidationError::required("value"));
    }

    require_text("publishDate", &book.publish_date)?;

    if book.category_id <= 0 {
        return Err(ValidationError::required("categoryId"));
    }

    Ok(())
}

/// Checks that a category has a name.
pub fn validate_category(category: &Category) -> ValidationResult<()> {
    require_text("name", &category.name)
}

/// Validates a search query.
///
/// ## Rules
/// - Must not be blank
/// - Maximum [`MAX_SEARCH_QUERY_LEN`] characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::required("query"));
    }

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

// =============================================================================
// Normalisation
// =============================================================================

/// Expands a bare `YYYY-MM-DD` into an ISO date-time at UTC midnight.
///
/// Anything else (already a date-time, or not a date at all) is returned
/// unchanged.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::normalize_publish_date;
///
/// assert_eq!(normalize_publish_date("1925-04-10"), "1925-04-10T00:00:00.000Z");
/// assert_eq!(normalize_publish_date("1925-04-10T00:00:00.000Z"), "1925-04-10T00:00:00.000Z");
/// ```
pub fn normalize_publish_date(raw: &str) -> String {
    let is_bare_date = raw.len() == 10 && NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok();
    if is_bare_date {
        format!("{raw}T00:00:00.000Z")
    } else {
        raw.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn complete_book() -> Book {
        Book {
            id: None,
            category_id: 2,
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Desert planet".to_string(),
            value: Money::from_cents(999),
            publish_date: "1965-08-01".to_string(),
        }
    }

    #[test]
    fn test_complete_book_passes() {
        assert!(validate_book(&complete_book()).is_ok());
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let cases: Vec<(&str, Box<dyn Fn(&mut Book)>)> = vec![
            ("name", Box::new(|b| b.name.clear())),
            ("author", Box::new(|b| b.author = "  ".to_string())),
            ("description", Box::new(|b| b.description.clear())),
            ("value", Box::new(|b| b.value = Money::zero())),
            ("publishDate", Box::new(|b| b.publish_date.clear())),
            ("categoryId", Box::new(|b| b.category_id = 0)),
        ];

        for (field, mutate) in cases {
            let mut book = complete_book();
            mutate(&mut book);
            assert_eq!(
                validate_book(&book),
                Err(ValidationError::Required {
                    field: field.to_string()
                }),
                "expected {field} to be required"
            );
        }
    }

    #[test]
    fn test_category_needs_name() {
        assert!(validate_category(&Category::named("Poetry")).is_ok());
        assert!(validate_category(&Category::default()).is_err());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(validate_search_query("  gatsby ").unwrap(), "gatsby");
        assert!(validate_search_query("   ").is_err());
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_normalize_publish_date() {
        assert_eq!(normalize_publish_date("2020-02-29"), "2020-02-29T00:00:00.000Z");
        assert_eq!(normalize_publish_date("2021-02-30"), "2021-02-30");
        assert_eq!(normalize_publish_date("soon"), "soon");
    }
}
