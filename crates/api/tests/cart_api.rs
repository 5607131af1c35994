//! Integration tests for the cart endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, post, post_json, put_json};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use storefront_catalog::MockCatalog;
use storefront_core::catalog::Product;

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn line_quantity(json: &Value, product_id: i64) -> Option<i64> {
    json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["product"]["id"] == product_id)
        .and_then(|line| line["quantity"].as_i64())
}

#[tokio::test]
async fn new_session_starts_with_empty_cart() {
    let (app, _cart) = common::build_test_app();
    let response = get(app, "/api/cart").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"], json!([]));
    assert_eq!(json["data"]["totals"]["itemCount"], 0);
    assert_money(&json["data"]["totals"]["amount"], 0.0);
    assert_money(&json["data"]["summary"]["total"], 0.0);
}

#[tokio::test]
async fn add_then_update_then_decrement() {
    let (app, cart) = common::build_test_app();

    // Wallet at 89.99, twice.
    let json = body_json(
        post_json(app.clone(), "/api/cart/items", json!({ "productId": 4, "quantity": 2 })).await,
    )
    .await;
    assert_eq!(line_quantity(&json, 4), Some(2));
    assert_eq!(json["data"]["totals"]["itemCount"], 2);
    assert_money(&json["data"]["totals"]["amount"], 179.98);
    assert_money(&json["data"]["items"][0]["lineTotal"], 179.98);

    // Adding again accumulates.
    let json = body_json(
        post_json(app.clone(), "/api/cart/items", json!({ "productId": 4, "quantity": 2 })).await,
    )
    .await;
    assert_eq!(line_quantity(&json, 4), Some(4));
    assert_money(&json["data"]["totals"]["amount"], 359.96);

    let json = body_json(put_json(app.clone(), "/api/cart/items/4", json!({ "quantity": 3 })).await).await;
    assert_eq!(line_quantity(&json, 4), Some(3));
    assert_money(&json["data"]["totals"]["amount"], 269.97);

    let json = body_json(post(app.clone(), "/api/cart/items/4/decrement").await).await;
    assert_eq!(line_quantity(&json, 4), Some(2));

    let json = body_json(post(app, "/api/cart/items/4/increment").await).await;
    assert_eq!(line_quantity(&json, 4), Some(3));

    assert_eq!(cart.read().await.totals().amount, dec!(269.97));
}

#[tokio::test]
async fn add_defaults_to_quantity_one() {
    let (app, _cart) = common::build_test_app();
    let json = body_json(post_json(app, "/api/cart/items", json!({ "productId": 8 })).await).await;

    assert_eq!(line_quantity(&json, 8), Some(1));
}

#[tokio::test]
async fn summary_includes_tax_and_free_shipping() {
    let (app, _cart) = common::build_test_app();
    let json = body_json(
        post_json(app, "/api/cart/items", json!({ "productId": 1, "quantity": 2 })).await,
    )
    .await;

    let summary = &json["data"]["summary"];
    assert_money(&summary["subtotal"], 599.98);
    assert_money(&summary["shipping"], 0.0);
    assert_money(&summary["tax"], 60.0);
    assert_money(&summary["total"], 659.98);
}

#[tokio::test]
async fn update_to_zero_removes_line() {
    let (app, cart) = common::build_test_app();
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 2 })).await;

    let response = put_json(app, "/api/cart/items/2", json!({ "quantity": 0 })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"], json!([]));
    assert!(cart.read().await.items().is_empty());
}

#[tokio::test]
async fn decrement_from_one_removes_line() {
    let (app, _cart) = common::build_test_app();
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 3 })).await;
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 5 })).await;

    let json = body_json(post(app, "/api/cart/items/3/decrement").await).await;

    assert_eq!(line_quantity(&json, 3), None);
    assert_eq!(line_quantity(&json, 5), Some(1));
    assert_eq!(json["data"]["totals"]["itemCount"], 1);
}

#[tokio::test]
async fn add_zero_quantity_is_rejected() {
    let (app, cart) = common::build_test_app();
    let response = post_json(app, "/api/cart/items", json!({ "productId": 1, "quantity": 0 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(cart.read().await.items().is_empty());
}

#[tokio::test]
async fn add_unknown_product_returns_404() {
    let (app, _cart) = common::build_test_app();
    let response = post_json(app, "/api/cart/items", json!({ "productId": 404 })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Product with id 404 not found");
}

#[tokio::test]
async fn add_out_of_stock_product_is_rejected() {
    let mut products = MockCatalog::storefront().products().to_vec();
    products[0].stock = 0;
    let (app, _cart) = common::build_test_app_with(Arc::new(MockCatalog::new(products, vec![])));

    let response = post_json(app, "/api/cart/items", json!({ "productId": 1 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Product 1 is not available");
}

#[tokio::test]
async fn operations_on_missing_lines_leave_cart_unchanged() {
    let (app, _cart) = common::build_test_app();
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 7 })).await;

    for response in [
        delete(app.clone(), "/api/cart/items/99").await,
        put_json(app.clone(), "/api/cart/items/99", json!({ "quantity": 4 })).await,
        post(app.clone(), "/api/cart/items/99/increment").await,
    ] {
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(line_quantity(&json, 7), Some(1));
    }
}

#[tokio::test]
async fn remove_and_clear() {
    let (app, _cart) = common::build_test_app();
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 1 })).await;
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 2 })).await;
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 3 })).await;

    let json = body_json(delete(app.clone(), "/api/cart/items/2").await).await;
    assert_eq!(line_quantity(&json, 2), None);
    assert_eq!(json["data"]["totals"]["itemCount"], 2);

    let json = body_json(delete(app.clone(), "/api/cart").await).await;
    assert_eq!(json["data"]["items"], json!([]));
    assert_eq!(json["data"]["totals"]["itemCount"], 0);

    // Health reports the empty cart too.
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["cart_items"], 0);
}

#[tokio::test]
async fn cart_events_are_published_per_change() {
    let (app, cart) = common::build_test_app();
    let mut rx = cart.read().await.subscribe();

    post_json(app.clone(), "/api/cart/items", json!({ "productId": 1 })).await;
    delete(app.clone(), "/api/cart/items/55").await;
    delete(app, "/api/cart").await;

    let types: Vec<&str> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|e| e.kind.event_type())
        .collect();
    assert_eq!(types, vec!["cart.item_added", "cart.cleared"]);
}

#[tokio::test]
async fn refresh_updates_prices_and_drops_vanished_products() {
    let mut products = MockCatalog::storefront().products().to_vec();
    products[0].price = dec!(249.99);
    let (app, cart) = common::build_test_app_with(Arc::new(MockCatalog::new(products, vec![])));

    {
        let mut store = cart.write().await;
        let mut stale = MockCatalog::storefront().products()[0].clone();
        stale.price = dec!(299.99);
        store.add_item(stale, 2);
        store.add_item(
            Product {
                id: 77,
                name: "Discontinued Lamp".into(),
                description: String::new(),
                price: dec!(15),
                stock: 1,
                image_url: None,
                category: None,
                is_active: true,
            },
            1,
        );
    }

    let response = post(app, "/api/cart/refresh").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(line_quantity(&json, 1), Some(2));
    assert_eq!(line_quantity(&json, 77), None);
    assert_money(&json["data"]["totals"]["amount"], 499.98);
}

#[tokio::test]
async fn add_more_than_stock_is_rejected() {
    let (app, cart) = common::build_test_app();
    let response = post_json(app, "/api/cart/items", json!({ "productId": 1, "quantity": 1000 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Only 15 of product 1 in stock");
    assert!(cart.read().await.items().is_empty());
}

#[tokio::test]
async fn repeated_adds_cannot_exceed_stock() {
    let (app, cart) = common::build_test_app();

    // Coffee maker has 12 in stock.
    let response = post_json(app.clone(), "/api/cart/items", json!({ "productId": 6, "quantity": 12 })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(app.clone(), "/api/cart/items", json!({ "productId": 6 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post(app.clone(), "/api/cart/items/6/increment").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(app, "/api/cart/items/6", json!({ "quantity": 13 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(cart.read().await.quantity_of(6), 12);
}

#[tokio::test]
async fn negative_add_quantity_uses_error_envelope() {
    let (app, _cart) = common::build_test_app();
    let response = post_json(app, "/api/cart/items", json!({ "productId": 1, "quantity": -1 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn malformed_update_body_uses_error_envelope() {
    let (app, _cart) = common::build_test_app();
    post_json(app.clone(), "/api/cart/items", json!({ "productId": 2 })).await;

    let response = put_json(app, "/api/cart/items/2", json!({ "quantity": "three" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
