//! The session cart store.
//!
//! [`CartStore`] owns the session's [`Cart`] together with the [`EventBus`]
//! its observers subscribe to. It is created empty when a session starts
//! and is handed to consumers explicitly; there is no global instance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront_core::cart::{Cart, CartChange, CartItem, CartTotals};
use storefront_core::catalog::Product;
use storefront_core::pricing::OrderSummary;
use storefront_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

use crate::bus::{CartEvent, CartEventKind, EventBus};

/// A store shared between request handlers and background subscribers.
pub type SharedCartStore = Arc<RwLock<CartStore>>;

/// Serializable copy of the cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
}

/// Session-owned cart with change notification.
///
/// Every mutation that changes the cart publishes exactly one
/// [`CartEvent`]. Mutations that leave the cart as it was (unknown product
/// id, zero quantity, clearing an empty cart) publish nothing.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Cart,
    bus: EventBus,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedCartStore {
        Arc::new(RwLock::new(self))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.bus.subscribe()
    }

    // ---- reads ----

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn get(&self, product_id: DbId) -> Option<&CartItem> {
        self.cart.get(product_id)
    }

    /// Units of `product_id` already in the cart (0 when absent).
    pub fn quantity_of(&self, product_id: DbId) -> u32 {
        self.cart.quantity_of(product_id)
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_totals(&self.cart.totals())
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.cart.items().to_vec(),
        }
    }

    // ---- mutations ----

    pub fn add_item(&mut self, product: Product, quantity: u32) -> Option<CartChange> {
        let change = self.cart.add_item(product, quantity);
        self.notify(change)
    }

    pub fn update_quantity(&mut self, product_id: DbId, new_quantity: i64) -> Option<CartChange> {
        let change = self.cart.update_quantity(product_id, new_quantity);
        self.notify(change)
    }

    pub fn increment(&mut self, product_id: DbId) -> Option<CartChange> {
        let change = self.cart.increment(product_id);
        self.notify(change)
    }

    pub fn decrement(&mut self, product_id: DbId) -> Option<CartChange> {
        let change = self.cart.decrement(product_id);
        self.notify(change)
    }

    pub fn remove_item(&mut self, product_id: DbId) -> Option<CartChange> {
        let change = self.cart.remove_item(product_id);
        self.notify(change)
    }

    pub fn clear(&mut self) -> Option<CartChange> {
        let change = self.cart.clear();
        self.notify(change)
    }

    pub fn refresh_product(&mut self, product: Product) -> Option<CartChange> {
        let change = self.cart.refresh_product(product);
        self.notify(change)
    }

    /// Replace the cart contents with a snapshot.
    ///
    /// Lines are re-added one by one, so zero-quantity lines are dropped and
    /// duplicate product ids are merged. Returns `true` if the cart changed.
    pub fn restore(&mut self, snapshot: CartSnapshot) -> bool {
        let mut cart = Cart::new();
        for item in snapshot.items {
            cart.add_item(item.product, item.quantity);
        }

        if cart == self.cart {
            return false;
        }

        self.cart = cart;
        let totals = self.cart.totals();
        tracing::debug!(
            lines = self.cart.items().len(),
            item_count = totals.item_count,
            "Cart restored from snapshot"
        );
        self.bus
            .publish(CartEvent::new(CartEventKind::Restored, totals));
        true
    }

    fn notify(&self, change: Option<CartChange>) -> Option<CartChange> {
        if let Some(change) = change {
            let totals = self.cart.totals();
            tracing::debug!(
                ?change,
                item_count = totals.item_count,
                amount = %totals.amount,
                "Cart changed"
            );
            self.bus.publish(CartEvent::from_change(change, totals));
        }
        change
    }
}
