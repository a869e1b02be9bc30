//! # API Errors
//!
//! Every failure a handler can report, and how it goes out on the wire.
//!
//! ```text
//! ApiError ──► (status, { "error": "<message>" })
//!
//!   BookNotFound      404  "Book not found"
//!   CategoryNotFound  404  "Category not found"
//!   MissingFields     400  "All fields are required"
//!   BadRequest        400  free text
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookstore_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Book not found")]
    BookNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    /// A create or update left a required field empty.
    #[error("All fields are required")]
    MissingFields,

    /// The body could not be applied to the record.
    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BookNotFound | ApiError::CategoryNotFound => StatusCode::NOT_FOUND,
            ApiError::MissingFields | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(_) => ApiError::BookNotFound,
            CoreError::CategoryNotFound(_) => ApiError::CategoryNotFound,
            CoreError::Validation(_) => ApiError::MissingFields,
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self, "Request rejected");

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_statuses() {
        assert_eq!(ApiError::from(CoreError::BookNotFound(9)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(CoreError::CategoryNotFound(9)).to_string(),
            "Category not found"
        );

        let invalid = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        });
        let api = ApiError::from(invalid);
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_string(), "All fields are required");
    }
}
