//! # Routes
//!
//! The HTTP surface of the catalog API.
//!
//! ```text
//! /api/Books                                          GET  POST
//! /api/Books/{id}                                     GET  PUT  DELETE
//! /api/Books/get-books-by-category/{categoryId}       GET
//! /api/Books/search/{query}                           GET  name, author
//! /api/Books/search-book-with-category/{query}        GET  + category name
//! /api/Books/search-book-in-category/{query}/{id}     GET  + description
//! /api/Categories                                     GET  POST
//! /api/Categories/{id}                                GET  PUT  DELETE
//! /api/Categories/search/{query}                      GET  name
//! ```
//!
//! Ids that don't parse are treated as missing records (404), except in
//! the category listing, where they simply match nothing.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bookstore_core::{Book, Category};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::store::{CatalogStore, Patch};

pub type SharedStore = Arc<CatalogStore>;

/// Builds the API router over `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/Books", get(list_books).post(create_book))
        .route(
            "/api/Books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route(
            "/api/Books/get-books-by-category/{category_id}",
            get(books_by_category),
        )
        .route("/api/Books/search/{query}", get(search_books))
        .route(
            "/api/Books/search-book-with-category/{query}",
            get(search_books_with_category),
        )
        .route(
            "/api/Books/search-book-in-category/{query}/{category_id}",
            get(search_books_in_category),
        )
        .route(
            "/api/Categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/Categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/api/Categories/search/{query}", get(search_categories))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

// =============================================================================
// Extractor Helpers
// =============================================================================

fn book_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::BookNotFound)
}

fn category_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::CategoryNotFound)
}

/// Unwraps a JSON body, reporting a bad one as `{ "error": ... }`.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Books
// =============================================================================

async fn list_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    Json(store.books().await)
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    let book = store.book(book_id(&id)?).await?;
    Ok(Json(book))
}

async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<Book>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let created = store.create_book(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<Patch>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let id = book_id(&id)?;
    let updated = store.update_book(id, body(payload)?).await?;
    Ok(Json(updated))
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    let removed = store.delete_book(book_id(&id)?).await?;
    Ok(Json(removed))
}

async fn books_by_category(
    State(store): State<SharedStore>,
    Path(category_id): Path<String>,
) -> Json<Vec<Book>> {
    let books = match category_id.trim().parse() {
        Ok(id) => store.books_in_category(id).await,
        Err(_) => Vec::new(),
    };
    Json(books)
}

async fn search_books(
    State(store): State<SharedStore>,
    Path(query): Path<String>,
) -> Json<Vec<Book>> {
    Json(store.search_books(&query).await)
}

async fn search_books_with_category(
    State(store): State<SharedStore>,
    Path(query): Path<String>,
) -> Json<Vec<Book>> {
    Json(store.search_books_with_category(&query).await)
}

async fn search_books_in_category(
    State(store): State<SharedStore>,
    Path((query, category_id)): Path<(String, String)>,
) -> Json<Vec<Book>> {
    let books = match category_id.trim().parse() {
        Ok(id) => store.search_books_in_category(&query, id).await,
        Err(_) => Vec::new(),
    };
    Json(books)
}

// =============================================================================
// Categories
// =============================================================================

async fn list_categories(State(store): State<SharedStore>) -> Json<Vec<Category>> {
    Json(store.categories().await)
}

async fn get_category(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = store.category(category_id(&id)?).await?;
    Ok(Json(category))
}

async fn create_category(
    State(store): State<SharedStore>,
    payload: Result<Json<Category>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = store.create_category(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<Patch>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let id = category_id(&id)?;
    let updated = store.update_category(id, body(payload)?).await?;
    Ok(Json(updated))
}

async fn delete_category(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let removed = store.delete_category(category_id(&id)?).await?;
    Ok(Json(removed))
}

async fn search_categories(
    State(store): State<SharedStore>,
    Path(query): Path<String>,
) -> Json<Vec<Category>> {
    Json(store.search_categories(&query).await)
}

// =============================================================================
// Handler Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(CatalogStore::seeded()))
    }

    async fn send(app: &Router, method: &str, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match payload {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_list_books() {
        let (status, body) = send(&app(), "GET", "/api/Books", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["name"], "The Great Gatsby");
        assert_eq!(body[0]["value"], 15.99);
        assert_eq!(body[0]["publishDate"], "1925-04-10T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/Books/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Book not found" }));

        let (status, _) = send(&app, "GET", "/api/Books/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_book() {
        let app = app();
        let draft = json!({
            "categoryId": 1,
            "name": "Dune",
            "author": "Frank Herbert",
            "description": "Desert planet",
            "value": 9.99,
            "publishDate": "1965-08-01"
        });

        let (status, body) = send(&app, "POST", "/api/Books", Some(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 3);
        assert_eq!(body["publishDate"], "1965-08-01T00:00:00.000Z");

        let (status, body) = send(&app, "GET", "/api/Books/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Dune");
    }

    #[tokio::test]
    async fn test_create_book_missing_fields() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/Books",
            Some(json!({ "name": "Dune", "categoryId": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "All fields are required" }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/Books",
            Some(json!({ "value": "free" })),
        )
        .await;

        assert!(status.is_client_error());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_book_merges() {
        let app = app();

        let (status, body) = send(
            &app,
            "PUT",
            "/api/Books/1",
            Some(json!({ "value": 11.5, "publishDate": "1926-01-01" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["author"], "F. Scott Fitzgerald");
        assert_eq!(body["value"], 11.5);
        assert_eq!(body["publishDate"], "1926-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_delete_book_returns_record() {
        let app = app();

        let (status, body) = send(&app, "DELETE", "/api/Books/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "To Kill a Mockingbird");

        let (status, _) = send(&app, "DELETE", "/api/Books/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_book_searches() {
        let app = app();

        let (_, body) = send(&app, "GET", "/api/Books/get-books-by-category/2", None).await;
        assert_eq!(body[0]["id"], 2);

        let (_, body) = send(&app, "GET", "/api/Books/search/great%20gatsby", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 1);

        let (_, body) = send(&app, "GET", "/api/Books/search-book-with-category/fiction", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 1);

        let (_, body) = send(&app, "GET", "/api/Books/search-book-in-category/injustice/2", None).await;
        assert_eq!(body[0]["id"], 2);

        let (_, body) = send(&app, "GET", "/api/Books/search-book-in-category/injustice/1", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_category_crud() {
        let app = app();

        let (status, created) = send(&app, "POST", "/api/Categories", Some(json!({ "name": "Poetry" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 3);

        let (_, renamed) = send(&app, "PUT", "/api/Categories/3", Some(json!({ "name": "Verse" }))).await;
        assert_eq!(renamed["name"], "Verse");

        let (_, found) = send(&app, "GET", "/api/Categories/search/VER", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, removed) = send(&app, "DELETE", "/api/Categories/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["name"], "Verse");

        let (status, body) = send(&app, "GET", "/api/Categories/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Category not found" }));
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let request = Request::builder()
            .uri("/api/Categories")
            .header("origin", "http://localhost:4200")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
