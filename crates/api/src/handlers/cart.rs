//! Handlers for the session cart.
//!
//! Every endpoint answers with the full [`CartView`] after the operation,
//! so the UI can re-render the cart page and the header badge from one
//! response. Operations on product ids that are not in the cart are
//! no-ops and still answer 200 with the unchanged cart.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_catalog::CatalogError;
use storefront_core::cart::CartTotals;
use storefront_core::catalog::{clamp_selection, validate_product, Product};
use storefront_core::error::CoreError;
use storefront_core::pricing::OrderSummary;
use storefront_core::types::DbId;
use storefront_events::CartStore;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One cart line as rendered by the cart page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// The cart contents together with its derived figures.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub summary: OrderSummary,
}

impl CartView {
    pub fn from_store(store: &CartStore) -> Self {
        let items = store
            .items()
            .iter()
            .map(|item| CartLine {
                product: item.product.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        Self {
            items,
            totals: store.totals(),
            summary: store.summary(),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: DbId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; zero or less removes the line.
    pub quantity: i64,
}

/// Reject a line quantity larger than the product picker allows.
fn ensure_in_stock(product: &Product, wanted: u64) -> AppResult<()> {
    let requested = u32::try_from(wanted).unwrap_or(u32::MAX);
    if clamp_selection(requested, product.stock) < requested {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Only {} of product {} in stock",
            product.stock, product.id
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cart = state.cart.read().await;

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// POST /api/cart/items
///
/// Resolve the product through the catalog, then add it to the cart.
pub async fn add_item(
    State(state): State<AppState>,
    AppJson(input): AppJson<AddItemRequest>,
) -> AppResult<impl IntoResponse> {
    if input.quantity == 0 {
        return Err(AppError::Core(CoreError::Validation(
            "quantity must be at least 1".to_string(),
        )));
    }

    let product = state.catalog.get_product(input.product_id).await?;
    validate_product(&product)?;
    if !product.is_available() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Product {} is not available",
            product.id
        ))));
    }

    let mut cart = state.cart.write().await;
    let wanted = u64::from(cart.quantity_of(product.id)) + u64::from(input.quantity);
    ensure_in_stock(&product, wanted)?;
    cart.add_item(product, input.quantity);

    tracing::info!(
        product_id = input.product_id,
        quantity = input.quantity,
        "Item added to cart",
    );

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// PUT /api/cart/items/{product_id}
pub async fn update_quantity(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateQuantityRequest>,
) -> AppResult<impl IntoResponse> {
    let mut cart = state.cart.write().await;
    if let Some(item) = cart.get(product_id) {
        // Non-positive quantities remove the line and need no stock.
        ensure_in_stock(&item.product, u64::try_from(input.quantity).unwrap_or(0))?;
    }
    if cart.update_quantity(product_id, input.quantity).is_some() {
        tracing::info!(product_id, quantity = input.quantity, "Cart quantity updated");
    }

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// POST /api/cart/items/{product_id}/increment
pub async fn increment_item(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut cart = state.cart.write().await;
    if let Some(item) = cart.get(product_id) {
        ensure_in_stock(&item.product, u64::from(item.quantity) + 1)?;
    }
    cart.increment(product_id);

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// POST /api/cart/items/{product_id}/decrement
///
/// A line at quantity 1 is removed.
pub async fn decrement_item(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut cart = state.cart.write().await;
    cart.decrement(product_id);

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// DELETE /api/cart/items/{product_id}
pub async fn remove_item(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut cart = state.cart.write().await;
    if cart.remove_item(product_id).is_some() {
        tracing::info!(product_id, "Item removed from cart");
    }

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// DELETE /api/cart
pub async fn clear_cart(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut cart = state.cart.write().await;
    if cart.clear().is_some() {
        tracing::info!("Cart cleared");
    }

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}

/// POST /api/cart/refresh
///
/// Re-fetch every line's product so totals follow current catalog prices.
/// Lines whose product no longer exists are dropped.
pub async fn refresh_cart(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ids: Vec<DbId> = state
        .cart
        .read()
        .await
        .items()
        .iter()
        .map(|item| item.product.id)
        .collect();

    // Catalog lookups happen without holding the cart lock.
    let mut fresh = Vec::with_capacity(ids.len());
    let mut gone = Vec::new();
    for id in ids {
        match state.catalog.get_product(id).await {
            Ok(product) => fresh.push(product),
            Err(CatalogError::NotFound { .. }) => gone.push(id),
            Err(e) => return Err(e.into()),
        }
    }

    let mut cart = state.cart.write().await;
    let refreshed = fresh
        .into_iter()
        .filter_map(|product| cart.refresh_product(product))
        .count();
    for id in &gone {
        cart.remove_item(*id);
    }

    tracing::info!(refreshed, removed = gone.len(), "Cart refreshed from catalog");

    Ok(Json(DataResponse {
        data: CartView::from_store(&cart),
    }))
}
