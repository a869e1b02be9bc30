//! # Category Accessor
//!
//! Request wrappers for `/Categories`: CRUD plus name search.

use bookstore_core::Category;
use reqwest::Method;

use crate::client::CatalogClient;
use crate::error::CatalogResult;

const CATEGORIES: &str = "Categories";

/// Category endpoints, borrowed from a [`CatalogClient`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryApi<'a> {
    client: &'a CatalogClient,
}

impl<'a> CategoryApi<'a> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        CategoryApi { client }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        let url = self.client.endpoint(&[CATEGORIES])?;
        self.client.get(url).await
    }

    pub async fn get(&self, id: i64) -> CatalogResult<Category> {
        let url = self.client.endpoint(&[CATEGORIES, &id.to_string()])?;
        self.client.get(url).await
    }

    /// Creates a category and returns it with its new id.
    pub async fn create(&self, category: &Category) -> CatalogResult<Category> {
        let url = self.client.endpoint(&[CATEGORIES])?;
        self.client.send_json(Method::POST, url, category).await
    }

    pub async fn update(&self, id: i64, category: &Category) -> CatalogResult<Category> {
        let url = self.client.endpoint(&[CATEGORIES, &id.to_string()])?;
        self.client.send_json(Method::PUT, url, category).await
    }

    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        let url = self.client.endpoint(&[CATEGORIES, &id.to_string()])?;
        self.client.delete(url).await
    }

    /// Categories whose name contains `query`.
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<Category>> {
        let url = self.client.endpoint(&[CATEGORIES, "search", query])?;
        self.client.get(url).await
    }
}
