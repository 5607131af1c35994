//! REST client for a remote catalog service.
//!
//! Wraps `GET /products`, `/products/{id}`, `/categories`, and
//! `/categories/{id}` using [`reqwest`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use storefront_core::catalog::{Category, Product, ProductFilter};
use storefront_core::types::DbId;

use crate::error::CatalogError;
use crate::source::CatalogSource;

/// Catalog base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP client for one catalog service.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// * `base_url` - e.g. `http://localhost:8080/api`. A trailing slash is
    ///   ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query-string pairs for a product filter. Absent fields are omitted.
    fn filter_params(filter: &ProductFilter) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if filter.active == Some(true) {
            params.push(("active", "true".to_string()));
        }
        if let Some(category) = filter.category {
            params.push(("category", category.to_string()));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(min) = filter.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = filter.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Catalog request");

        let response = self.client.get(&url).query(query).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch a single entity, turning a 404 into [`CatalogError::NotFound`].
    async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: &'static str,
        id: DbId,
    ) -> Result<T, CatalogError> {
        match self.get_json(path, &[]).await {
            Err(CatalogError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(CatalogError::NotFound { entity, id })
            }
            other => other,
        }
    }

    /// Return the response unchanged on a 2xx status, otherwise an
    /// [`CatalogError::Api`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        self.get_json("/products", &Self::filter_params(filter)).await
    }

    async fn get_product(&self, id: DbId) -> Result<Product, CatalogError> {
        self.get_one(&format!("/products/{id}"), "Product", id).await
    }

    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, CatalogError> {
        let query = if active_only {
            vec![("active", "true".to_string())]
        } else {
            Vec::new()
        };
        self.get_json("/categories", &query).await
    }

    async fn get_category(&self, id: DbId) -> Result<Category, CatalogError> {
        self.get_one(&format!("/categories/{id}"), "Category", id).await
    }
}
