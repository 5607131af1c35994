pub mod cart;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                        list (filter + sort)
/// /products/{id}                                   get
/// /categories                                      list
/// /categories/{id}                                 get
///
/// /cart                                            view, clear
/// /cart/refresh                                    re-price from catalog (POST)
/// /cart/items                                      add (POST)
/// /cart/items/{product_id}                         set quantity (PUT), remove
/// /cart/items/{product_id}/increment               +1 (POST)
/// /cart/items/{product_id}/decrement               -1 (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/cart", cart::router())
}
