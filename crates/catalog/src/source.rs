use async_trait::async_trait;
use storefront_core::catalog::{Category, Product, ProductFilter};
use storefront_core::types::DbId;

use crate::error::CatalogError;

/// Read access to the product catalog.
///
/// Single lookups return [`CatalogError::NotFound`] for unknown ids.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /products` with the given filter applied.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError>;

    /// `GET /products/{id}`.
    async fn get_product(&self, id: DbId) -> Result<Product, CatalogError>;

    /// `GET /categories`, optionally only active ones.
    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, CatalogError>;

    /// `GET /categories/{id}`.
    async fn get_category(&self, id: DbId) -> Result<Category, CatalogError>;
}
