//! # Domain Types
//!
//! Core domain types shared by the storefront and the catalog API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    Category     │   │  CartLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (optional)  │◄──│  id (optional)  │   │  book           │       │
//! │  │  categoryId     │   │  name           │   │  quantity ≥ 1   │       │
//! │  │  name, author   │   │  books (titles) │   └─────────────────┘       │
//! │  │  value (Money)  │   └─────────────────┘                             │
//! │  │  publishDate    │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                             │
//! │                        │    TaxRate      │                             │
//! │                        │  1000 = 10%     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Records created on the client have no `id` until the API assigns one.
//! `Default` for `Book` and `Category` is the empty form draft.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The storefront's flat sales tax: 10%.
    pub const STANDARD: TaxRate = TaxRate(1000);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (config convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::STANDARD
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
///
/// Also doubles as the admin "book form" draft: `Book::default()` is the
/// blank draft (`categoryId` 0, value 0, empty strings).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Book {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    /// Category this book belongs to. 0 means "not chosen yet".
    pub category_id: i64,

    pub name: String,

    pub author: String,

    pub description: String,

    /// Unit price.
    #[ts(type = "number")]
    pub value: Money,

    /// ISO-8601 date or date-time string.
    pub publish_date: String,
}

impl Book {
    /// A blank draft whose publish date defaults to `today`.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::types::Book;
    ///
    /// let draft = Book::draft("2024-03-01");
    /// assert_eq!(draft.publish_date, "2024-03-01");
    /// assert_eq!(draft.category_id, 0);
    /// assert!(draft.name.is_empty());
    /// ```
    pub fn draft(today: impl Into<String>) -> Self {
        Book {
            publish_date: today.into(),
            ..Book::default()
        }
    }

    /// The `YYYY-MM-DD` part of the publish date, as a date input expects.
    pub fn publish_day(&self) -> &str {
        date_part(&self.publish_date)
    }

    /// Parses the publish date for ordering. `None` if unparseable.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.publish_day(), DATE_FORMAT).ok()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A book category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    pub name: String,

    /// Titles of the books in this category. Display aid only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub books: Option<Vec<String>>,
}

impl Category {
    /// Creates an unsaved category with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            ..Category::default()
        }
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One (book, quantity) pairing inside the cart.
///
/// This is also the persisted shape: the cart slot holds a JSON array of
/// `{ "book": {...}, "quantity": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    pub book: Book,
    pub quantity: i64,
}

impl CartLineItem {
    /// A new line holding a single copy.
    pub fn single(book: Book) -> Self {
        CartLineItem { book, quantity: 1 }
    }

    /// `value × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.book.value.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Dates
// =============================================================================

/// `YYYY-MM-DD`, the form used by date inputs and the API's short dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Strips a time component: `"1925-04-10T00:00:00.000Z"` → `"1925-04-10"`.
pub fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_json_uses_camel_case() {
        let book = Book {
            id: Some(1),
            category_id: 1,
            name: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            description: "A classic American novel".to_string(),
            value: Money::from_cents(1599),
            publish_date: "1925-04-10T00:00:00.000Z".to_string(),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["value"], 15.99);
        assert_eq!(json["publishDate"], "1925-04-10T00:00:00.000Z");

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_unsaved_book_omits_id() {
        let json = serde_json::to_value(Book::draft("2024-01-01")).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let book: Book = serde_json::from_str(r#"{"name":"Dune"}"#).unwrap();
        assert_eq!(book.name, "Dune");
        assert_eq!(book.category_id, 0);
        assert!(book.value.is_zero());
    }

    #[test]
    fn test_publish_day_and_ordering() {
        let book = Book {
            publish_date: "1960-07-11T00:00:00.000Z".to_string(),
            ..Book::default()
        };
        assert_eq!(book.publish_day(), "1960-07-11");
        assert_eq!(
            book.published_on(),
            NaiveDate::from_ymd_opt(1960, 7, 11)
        );
        assert_eq!(Book::draft("not a date").published_on(), None);
    }

    #[test]
    fn test_today_is_formatted_date() {
        let today = today_utc();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_line_total() {
        let line = CartLineItem {
            book: Book {
                value: Money::from_cents(1999),
                ..Book::default()
            },
            quantity: 2,
        };
        assert_eq!(line.line_total(), Money::from_cents(3998));
    }

    #[test]
    fn test_category_books_is_optional() {
        let json = serde_json::to_string(&Category::named("Fiction")).unwrap();
        assert_eq!(json, r#"{"name":"Fiction"}"#);
    }

    #[test]
    fn test_default_tax_rate_is_ten_percent() {
        assert_eq!(TaxRate::default().bps(), 1000);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }
}
