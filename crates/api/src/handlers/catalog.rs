//! Read-only catalog endpoints.
//!
//! Products and categories are served straight from the configured
//! [`CatalogSource`](storefront_catalog::CatalogSource).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::query::{CategoryListParams, ProductListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/products
///
/// List products matching the filter, sorted by `sort` (default: name).
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let mut products = state.catalog.list_products(&params.filter()).await?;
    params.sort().sort(&mut products);

    Ok(Json(DataResponse { data: products }))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = state.catalog.get_product(product_id).await?;

    Ok(Json(DataResponse { data: product }))
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let categories = state.catalog.list_categories(params.active).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = state.catalog.get_category(category_id).await?;

    Ok(Json(DataResponse { data: category }))
}
