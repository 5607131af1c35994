//! Route definitions for the catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes, merged at the `/api` root.
///
/// ```text
/// GET /products              -> list_products
/// GET /products/{id}         -> get_product
/// GET /categories            -> list_categories
/// GET /categories/{id}       -> get_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{id}", get(catalog::get_category))
}
