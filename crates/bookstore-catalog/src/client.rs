//! # Catalog Client
//!
//! Shared HTTP plumbing for the book and category accessors.
//!
//! ## URL Construction
//! ```text
//! base:      http://localhost:82/api/
//! segments:  ["Books", "search", "war & peace"]
//!                │
//!                ▼  path_segments_mut().pop_if_empty().extend(..)
//! request:   http://localhost:82/api/Books/search/war%20&%20peace
//! ```
//! Each segment is percent-encoded on its own, so a search term can never
//! escape into another path segment.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::books::BookApi;
use crate::categories::CategoryApi;
use crate::error::{CatalogError, CatalogResult};

/// Body shape the API uses for failures: `{ "error": "Book not found" }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Entry point to the catalog API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
///
/// ## Usage
/// ```rust,ignore
/// let client = CatalogClient::new("http://localhost:82/api")?;
///
/// let books = client.books().list().await?;
/// let fiction = client.categories().search("fic").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client with no request timeout.
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client, optionally bounding every request by `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> CatalogResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(CatalogClient {
            http: builder.build()?,
            base_url: parsed,
        })
    }

    /// The API root every endpoint hangs off.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Book endpoints.
    pub fn books(&self) -> BookApi<'_> {
        BookApi::new(self)
    }

    /// Category endpoints.
    pub fn categories(&self) -> CategoryApi<'_> {
        CategoryApi::new(self)
    }

    // =========================================================================
    // Request helpers (used by the accessors)
    // =========================================================================

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        Self::decode(url, response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> CatalogResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, %method, "Sending JSON");
        let response = self
            .http
            .request(method, url.clone())
            .json(body)
            .send()
            .await?;
        Self::decode(url, response).await
    }

    /// DELETE, discarding whatever record the API echoes back.
    pub(crate) async fn delete(&self, url: Url) -> CatalogResult<()> {
        debug!(%url, "DELETE");
        let response = self.http.delete(url.clone()).send().await?;
        let response = Self::check_status(url, response).await?;
        // Drain so the connection can be reused
        let _ = response.bytes().await;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(url: Url, response: Response) -> CatalogResult<T> {
        let response = Self::check_status(url, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn check_status(url: Url, response: Response) -> CatalogResult<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound {
                url: url.to_string(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|b| b.error)
                    .unwrap_or(body);
                warn!(%url, status = status.as_u16(), %message, "Catalog API error");
                Err(CatalogError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let with_slash = CatalogClient::new("http://localhost:82/api/").unwrap();
        let without = CatalogClient::new("http://localhost:82/api").unwrap();

        assert_eq!(
            with_slash.endpoint(&["Books", "7"]).unwrap().as_str(),
            "http://localhost:82/api/Books/7"
        );
        assert_eq!(
            without.endpoint(&["Books", "7"]).unwrap().as_str(),
            "http://localhost:82/api/Books/7"
        );
    }

    #[test]
    fn test_endpoint_encodes_each_segment() {
        let client = CatalogClient::new("http://localhost:82/api").unwrap();
        let url = client.endpoint(&["Books", "search", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:82/api/Books/search/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            CatalogClient::new("not a url"),
            Err(CatalogError::InvalidUrl { .. })
        ));
        assert!(matches!(
            CatalogClient::new("mailto:books@example.com"),
            Err(CatalogError::InvalidUrl { .. })
        ));
    }
}
