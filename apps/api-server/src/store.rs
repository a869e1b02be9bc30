//! # Catalog Store
//!
//! The two in-memory collections behind the API, seeded with the sample
//! catalog on startup.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogStore                                                           │
//! │  └── RwLock<Collections>                                                │
//! │        ├── books:        Vec<Book>       (insertion order)              │
//! │        ├── categories:   Vec<Category>   (insertion order)              │
//! │        ├── next_book_id       starts at 3                               │
//! │        └── next_category_id   starts at 3                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Updates
//! PUT bodies are partial: each supplied field replaces the stored one and
//! everything else is kept. The stored `id` always wins over one in the body.
//! Bare `YYYY-MM-DD` publish dates are expanded on both create and update.

use bookstore_core::catalog::{
    book_matches, book_matches_in_category, book_matches_with_category, category_matches,
};
use bookstore_core::validation::{normalize_publish_date, validate_book, validate_category};
use bookstore_core::{Book, Category, CoreError, Money};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// A partial JSON record from a PUT body.
pub type Patch = Map<String, Value>;

#[derive(Debug)]
struct Collections {
    books: Vec<Book>,
    categories: Vec<Category>,
    next_book_id: i64,
    next_category_id: i64,
}

#[derive(Debug)]
pub struct CatalogStore {
    inner: RwLock<Collections>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        CatalogStore::seeded()
    }
}

impl CatalogStore {
    /// An empty store. Ids start at 1.
    pub fn empty() -> Self {
        CatalogStore::with_records(Vec::new(), Vec::new())
    }

    /// The sample catalog: two books, two categories.
    pub fn seeded() -> Self {
        let books = vec![
            Book {
                id: Some(1),
                category_id: 1,
                name: "The Great Gatsby".to_string(),
                author: "F. Scott Fitzgerald".to_string(),
                description: "A classic American novel".to_string(),
                value: Money::from_cents(1599),
                publish_date: "1925-04-10T00:00:00.000Z".to_string(),
            },
            Book {
                id: Some(2),
                category_id: 2,
                name: "To Kill a Mockingbird".to_string(),
                author: "Harper Lee".to_string(),
                description: "A novel about racial injustice".to_string(),
                value: Money::from_cents(1299),
                publish_date: "1960-07-11T00:00:00.000Z".to_string(),
            },
        ];

        let categories = vec![
            Category {
                id: Some(1),
                name: "Fiction".to_string(),
                books: Some(vec!["The Great Gatsby".to_string()]),
            },
            Category {
                id: Some(2),
                name: "Classic Literature".to_string(),
                books: Some(vec!["To Kill a Mockingbird".to_string()]),
            },
        ];

        CatalogStore::with_records(books, categories)
    }

    /// A store holding exactly these records. Id counters continue after
    /// the highest id present.
    pub fn with_records(books: Vec<Book>, categories: Vec<Category>) -> Self {
        let next_book_id = books.iter().filter_map(|b| b.id).max().unwrap_or(0) + 1;
        let next_category_id = categories.iter().filter_map(|c| c.id).max().unwrap_or(0) + 1;

        CatalogStore {
            inner: RwLock::new(Collections {
                books,
                categories,
                next_book_id,
                next_category_id,
            }),
        }
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub async fn books(&self) -> Vec<Book> {
        self.inner.read().await.books.clone()
    }

    pub async fn book(&self, id: i64) -> ApiResult<Book> {
        let inner = self.inner.read().await;
        inner
            .books
            .iter()
            .find(|b| b.id == Some(id))
            .cloned()
            .ok_or_else(|| CoreError::BookNotFound(id).into())
    }

    /// Adds a book under the next id. Rejects the record if any field is
    /// missing; the id counter only advances on success.
    pub async fn create_book(&self, mut book: Book) -> ApiResult<Book> {
        validate_book(&book).map_err(CoreError::from)?;
        book.publish_date = normalize_publish_date(&book.publish_date);

        let mut inner = self.inner.write().await;
        book.id = Some(inner.next_book_id);
        inner.next_book_id += 1;
        inner.books.push(book.clone());

        info!(id = ?book.id, name = %book.name, "Book created");
        Ok(book)
    }

    pub async fn update_book(&self, id: i64, patch: Patch) -> ApiResult<Book> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .books
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or(CoreError::BookNotFound(id))?;

        let mut merged: Book = merge(&*slot, patch)?;
        merged.id = Some(id);
        merged.publish_date = normalize_publish_date(&merged.publish_date);
        *slot = merged.clone();

        debug!(id, "Book updated");
        Ok(merged)
    }

    /// Removes a book and hands it back.
    pub async fn delete_book(&self, id: i64) -> ApiResult<Book> {
        let mut inner = self.inner.write().await;
        let index = inner
            .books
            .iter()
            .position(|b| b.id == Some(id))
            .ok_or(CoreError::BookNotFound(id))?;

        let removed = inner.books.remove(index);
        info!(id, name = %removed.name, "Book deleted");
        Ok(removed)
    }

    pub async fn books_in_category(&self, category_id: i64) -> Vec<Book> {
        self.select_books(|b| b.category_id == category_id).await
    }

    /// Name or author contains `query`, ignoring case.
    pub async fn search_books(&self, query: &str) -> Vec<Book> {
        self.select_books(|b| book_matches(b, query)).await
    }

    /// Like [`search_books`](Self::search_books), but the book's category
    /// name counts too.
    pub async fn search_books_with_category(&self, query: &str) -> Vec<Book> {
        let inner = self.inner.read().await;
        inner
            .books
            .iter()
            .filter(|b| {
                let category = inner
                    .categories
                    .iter()
                    .find(|c| c.id == Some(b.category_id));
                book_matches_with_category(b, query, category)
            })
            .cloned()
            .collect()
    }

    /// Books in `category_id` whose name, author or description contains
    /// `query`.
    pub async fn search_books_in_category(&self, query: &str, category_id: i64) -> Vec<Book> {
        self.select_books(|b| book_matches_in_category(b, query, category_id))
            .await
    }

    async fn select_books(&self, keep: impl Fn(&Book) -> bool) -> Vec<Book> {
        let inner = self.inner.read().await;
        inner.books.iter().filter(|b| keep(b)).cloned().collect()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn categories(&self) -> Vec<Category> {
        self.inner.read().await.categories.clone()
    }

    pub async fn category(&self, id: i64) -> ApiResult<Category> {
        let inner = self.inner.read().await;
        inner
            .categories
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| CoreError::CategoryNotFound(id).into())
    }

    pub async fn create_category(&self, mut category: Category) -> ApiResult<Category> {
        validate_category(&category).map_err(CoreError::from)?;

        let mut inner = self.inner.write().await;
        category.id = Some(inner.next_category_id);
        inner.next_category_id += 1;
        inner.categories.push(category.clone());

        info!(id = ?category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, patch: Patch) -> ApiResult<Category> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .categories
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(CoreError::CategoryNotFound(id))?;

        let mut merged: Category = merge(&*slot, patch)?;
        merged.id = Some(id);
        *slot = merged.clone();

        debug!(id, "Category updated");
        Ok(merged)
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<Category> {
        let mut inner = self.inner.write().await;
        let index = inner
            .categories
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(CoreError::CategoryNotFound(id))?;

        let removed = inner.categories.remove(index);
        info!(id, name = %removed.name, "Category deleted");
        Ok(removed)
    }

    pub async fn search_categories(&self, query: &str) -> Vec<Category> {
        let inner = self.inner.read().await;
        inner
            .categories
            .iter()
            .filter(|c| category_matches(c, query))
            .cloned()
            .collect()
    }
}

/// Lays `patch` over the JSON form of `current` and reads the result back.
fn merge<T: Serialize + DeserializeOwned>(current: &T, patch: Patch) -> ApiResult<T> {
    let mut record = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => return Err(ApiError::BadRequest(e.to_string())),
    };

    for (key, value) in patch {
        record.insert(key, value);
    }

    serde_json::from_value(Value::Object(record)).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> Patch {
        match value {
            Value::Object(map) => map,
            _ => panic!("patch must be an object"),
        }
    }

    fn dune() -> Book {
        Book {
            id: None,
            category_id: 1,
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Desert planet".to_string(),
            value: Money::from_cents(999),
            publish_date: "1965-08-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seeded_catalog() {
        let store = CatalogStore::seeded();

        let books = store.books().await;
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].name, "The Great Gatsby");
        assert_eq!(books[1].publish_date, "1960-07-11T00:00:00.000Z");

        let categories = store.categories().await;
        assert_eq!(categories[1].name, "Classic Literature");

        assert!(CatalogStore::empty().books().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_book_assigns_next_id_and_normalises_date() {
        let store = CatalogStore::seeded();

        let created = store.create_book(dune()).await.unwrap();
        assert_eq!(created.id, Some(3));
        assert_eq!(created.publish_date, "1965-08-01T00:00:00.000Z");

        assert_eq!(store.book(3).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_rejected_create_keeps_counter() {
        let store = CatalogStore::seeded();

        let incomplete = Book {
            author: String::new(),
            ..dune()
        };
        assert!(matches!(
            store.create_book(incomplete).await,
            Err(ApiError::MissingFields)
        ));

        assert_eq!(store.create_book(dune()).await.unwrap().id, Some(3));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = CatalogStore::seeded();

        let updated = store
            .update_book(1, patch(json!({ "value": 9.5, "publishDate": "2000-01-02", "id": 77 })))
            .await
            .unwrap();

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name, "The Great Gatsby");
        assert_eq!(updated.value, Money::from_decimal(9.5));
        assert_eq!(updated.publish_date, "2000-01-02T00:00:00.000Z");
        assert_eq!(store.book(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_with_bad_field_type() {
        let store = CatalogStore::seeded();

        let result = store.update_book(1, patch(json!({ "value": "cheap" }))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
        assert_eq!(store.book(1).await.unwrap().value, Money::from_cents(1599));
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = CatalogStore::seeded();

        assert!(matches!(store.book(42).await, Err(ApiError::BookNotFound)));
        assert!(matches!(
            store.update_category(42, Patch::new()).await,
            Err(ApiError::CategoryNotFound)
        ));
        assert!(matches!(store.delete_book(42).await, Err(ApiError::BookNotFound)));
    }

    #[tokio::test]
    async fn test_delete_returns_record() {
        let store = CatalogStore::seeded();

        let removed = store.delete_book(2).await.unwrap();
        assert_eq!(removed.name, "To Kill a Mockingbird");
        assert_eq!(store.books().await.len(), 1);
    }

    #[tokio::test]
    async fn test_searches() {
        let store = CatalogStore::seeded();

        let by_author = store.search_books("harper").await;
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, Some(2));

        // description only counts for the in-category search
        assert!(store.search_books("racial").await.is_empty());
        assert_eq!(store.search_books_in_category("racial", 2).await.len(), 1);
        assert!(store.search_books_in_category("racial", 1).await.is_empty());

        let via_category = store.search_books_with_category("classic lit").await;
        assert_eq!(via_category.len(), 1);
        assert_eq!(via_category[0].id, Some(2));

        assert_eq!(store.search_categories("FIC").await.len(), 1);
        assert_eq!(store.books_in_category(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_category_requires_name() {
        let store = CatalogStore::seeded();

        assert!(matches!(
            store.create_category(Category::named("  ")).await,
            Err(ApiError::MissingFields)
        ));

        let created = store.create_category(Category::named("Poetry")).await.unwrap();
        assert_eq!(created.id, Some(3));
    }

    #[tokio::test]
    async fn test_with_records_continues_ids() {
        let store = CatalogStore::with_records(
            vec![Book {
                id: Some(10),
                ..dune()
            }],
            Vec::new(),
        );

        assert_eq!(store.create_book(dune()).await.unwrap().id, Some(11));
        assert_eq!(
            store
                .create_category(Category::named("Poetry"))
                .await
                .unwrap()
                .id,
            Some(1)
        );
    }
}
