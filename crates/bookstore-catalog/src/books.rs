//! # Book Accessor
//!
//! Request wrappers for `/Books`.
//!
//! ## Endpoints
//! | Method | Path | Call |
//! |---|---|---|
//! | GET | `Books` | [`BookApi::list`] |
//! | GET | `Books/{id}` | [`BookApi::get`] |
//! | POST | `Books` | [`BookApi::create`] |
//! | PUT | `Books/{id}` | [`BookApi::update`] |
//! | DELETE | `Books/{id}` | [`BookApi::delete`] |
//! | GET | `Books/get-books-by-category/{categoryId}` | [`BookApi::by_category`] |
//! | GET | `Books/search/{q}` | [`BookApi::search`] |
//! | GET | `Books/search-book-with-category/{q}` | [`BookApi::search_with_category`] |
//! | GET | `Books/search-book-in-category/{q}/{categoryId}` | [`BookApi::search_in_category`] |

use bookstore_core::Book;
use reqwest::Method;

use crate::client::CatalogClient;
use crate::error::CatalogResult;

const BOOKS: &str = "Books";

/// Book endpoints, borrowed from a [`CatalogClient`].
#[derive(Debug, Clone, Copy)]
pub struct BookApi<'a> {
    client: &'a CatalogClient,
}

impl<'a> BookApi<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        BookApi { client }
    }

    /// Every book in the catalog.
    pub async fn list(&self) -> CatalogResult<Vec<Book>> {
        let url = self.client.endpoint(&[BOOKS])?;
        self.client.get(url).await
    }

    /// One book. A missing id is [`CatalogError::NotFound`](crate::CatalogError::NotFound).
    pub async fn get(&self, id: i64) -> CatalogResult<Book> {
        let url = self.client.endpoint(&[BOOKS, &id.to_string()])?;
        self.client.get(url).await
    }

    /// Creates a book and returns it with its new id.
    pub async fn create(&self, book: &Book) -> CatalogResult<Book> {
        let url = self.client.endpoint(&[BOOKS])?;
        self.client.send_json(Method::POST, url, book).await
    }

    /// Replaces the fields of book `id` and returns the stored record.
    pub async fn update(&self, id: i64, book: &Book) -> CatalogResult<Book> {
        let url = self.client.endpoint(&[BOOKS, &id.to_string()])?;
        self.client.send_json(Method::PUT, url, book).await
    }

    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        let url = self.client.endpoint(&[BOOKS, &id.to_string()])?;
        self.client.delete(url).await
    }

    /// Books whose `categoryId` equals `category_id`.
    pub async fn by_category(&self, category_id: i64) -> CatalogResult<Vec<Book>> {
        let url = self
            .client
            .endpoint(&[BOOKS, "get-books-by-category", &category_id.to_string()])?;
        self.client.get(url).await
    }

    /// Name or author contains `query`.
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<Book>> {
        let url = self.client.endpoint(&[BOOKS, "search", query])?;
        self.client.get(url).await
    }

    /// Name, author or category name contains `query`.
    pub async fn search_with_category(&self, query: &str) -> CatalogResult<Vec<Book>> {
        let url = self
            .client
            .endpoint(&[BOOKS, "search-book-with-category", query])?;
        self.client.get(url).await
    }

    /// Name, author or description contains `query`, within one category.
    pub async fn search_in_category(&self, query: &str, category_id: i64) -> CatalogResult<Vec<Book>> {
        let url = self.client.endpoint(&[
            BOOKS,
            "search-book-in-category",
            query,
            &category_id.to_string(),
        ])?;
        self.client.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogError;
    use bookstore_core::Money;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gatsby_json() -> serde_json::Value {
        json!({
            "id": 1,
            "categoryId": 1,
            "name": "The Great Gatsby",
            "author": "F. Scott Fitzgerald",
            "description": "A classic American novel",
            "value": 15.99,
            "publishDate": "1925-04-10T00:00:00.000Z"
        })
    }

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(&format!("{}/api", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_list_decodes_books() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([gatsby_json()])))
            .mount(&server)
            .await;

        let books = client_for(&server).await.books().list().await.unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, Some(1));
        assert_eq!(books[0].value, Money::from_cents(1599));
    }

    #[tokio::test]
    async fn test_get_missing_book_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Books/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Book not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.books().get(99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/Books"))
            .and(body_partial_json(json!({"categoryId": 1, "name": "The Great Gatsby"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(gatsby_json()))
            .expect(1)
            .mount(&server)
            .await;

        let draft = Book {
            id: None,
            category_id: 1,
            name: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            description: "A classic American novel".to_string(),
            value: Money::from_cents(1599),
            publish_date: "1925-04-10".to_string(),
        };

        let created = client_for(&server).await.books().create(&draft).await.unwrap();
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn test_validation_failure_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/Books"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "All fields are required"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .books()
            .create(&Book::default())
            .await
            .unwrap_err();

        match err {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "All fields are required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_routes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Books/search-book-in-category/gatsby/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([gatsby_json()])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Books/search-book-with-category/fiction"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Books/get-books-by-category/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let books = client.books();

        assert_eq!(books.search_in_category("gatsby", 1).await.unwrap().len(), 1);
        assert!(books.search_with_category("fiction").await.unwrap().is_empty());
        assert!(books.by_category(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_ignores_echoed_record() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/Books/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gatsby_json()))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.books().delete(1).await.unwrap();
    }
}
