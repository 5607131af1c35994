//! Route definitions for the session cart, mounted at `/cart`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// ```text
/// GET    /                                 -> get_cart
/// DELETE /                                 -> clear_cart
/// POST   /refresh                          -> refresh_cart
/// POST   /items                            -> add_item
/// PUT    /items/{product_id}               -> update_quantity
/// DELETE /items/{product_id}               -> remove_item
/// POST   /items/{product_id}/increment     -> increment_item
/// POST   /items/{product_id}/decrement     -> decrement_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get_cart).delete(cart::clear_cart))
        .route("/refresh", post(cart::refresh_cart))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{product_id}",
            put(cart::update_quantity).delete(cart::remove_item),
        )
        .route("/items/{product_id}/increment", post(cart::increment_item))
        .route("/items/{product_id}/decrement", post(cart::decrement_item))
}
