//! The session cart: an ordered set of product lines with derived totals.
//!
//! Invariants held by every operation:
//!
//! - at most one [`CartItem`] per product id;
//! - every stored quantity is at least 1;
//! - totals are recomputed from the stored product records on each call,
//!   never cached.
//!
//! None of the operations fail. Acting on a product id that is not in the
//! cart, or adding zero units, leaves the cart unchanged and returns `None`.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{DbId, Money};

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// `price × quantity` using the stored product record.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_mul(Money::from(self.quantity))
    }
}

/// Derived cart figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of all line quantities.
    pub item_count: u64,
    /// Sum of all line totals.
    pub amount: Money,
}

/// What a successful mutation did. Returned so callers can notify observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was inserted.
    Added { product_id: DbId, quantity: u32 },
    /// An existing line's quantity changed (including an add that merged).
    QuantityChanged { product_id: DbId, quantity: u32 },
    Removed { product_id: DbId },
    Cleared,
    /// The stored product record for a line was replaced.
    ProductRefreshed { product_id: DbId },
}

impl CartChange {
    pub fn product_id(&self) -> Option<DbId> {
        match *self {
            Self::Added { product_id, .. }
            | Self::QuantityChanged { product_id, .. }
            | Self::Removed { product_id }
            | Self::ProductRefreshed { product_id } => Some(product_id),
            Self::Cleared => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: DbId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn quantity_of(&self, product_id: DbId) -> u32 {
        self.get(product_id).map_or(0, |i| i.quantity)
    }

    fn position(&self, product_id: DbId) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// its stored record is replaced with `product`, so the line is priced
    /// from the newest catalog data. Adding zero units is a no-op.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Option<CartChange> {
        if quantity == 0 {
            return None;
        }

        let product_id = product.id;
        match self.position(product_id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity = item.quantity.saturating_add(quantity);
                item.product = product;
                Some(CartChange::QuantityChanged {
                    product_id,
                    quantity: item.quantity,
                })
            }
            None => {
                self.items.push(CartItem { product, quantity });
                Some(CartChange::Added {
                    product_id,
                    quantity,
                })
            }
        }
    }

    /// Set the quantity of an existing line. Zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: DbId, new_quantity: i64) -> Option<CartChange> {
        let idx = self.position(product_id)?;

        if new_quantity <= 0 {
            self.items.remove(idx);
            return Some(CartChange::Removed { product_id });
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let item = &mut self.items[idx];
        if item.quantity == quantity {
            return None;
        }
        item.quantity = quantity;
        Some(CartChange::QuantityChanged {
            product_id,
            quantity,
        })
    }

    /// The "+" button: one more unit of an existing line.
    pub fn increment(&mut self, product_id: DbId) -> Option<CartChange> {
        let current = self.get(product_id)?.quantity;
        self.update_quantity(product_id, i64::from(current) + 1)
    }

    /// The "−" button: one fewer unit. A line at quantity 1 is removed.
    pub fn decrement(&mut self, product_id: DbId) -> Option<CartChange> {
        let current = self.get(product_id)?.quantity;
        self.update_quantity(product_id, i64::from(current) - 1)
    }

    pub fn remove_item(&mut self, product_id: DbId) -> Option<CartChange> {
        let idx = self.position(product_id)?;
        self.items.remove(idx);
        Some(CartChange::Removed { product_id })
    }

    /// Empty the cart. Clearing an empty cart is a no-op.
    pub fn clear(&mut self) -> Option<CartChange> {
        if self.items.is_empty() {
            return None;
        }
        self.items.clear();
        Some(CartChange::Cleared)
    }

    /// Replace the stored record for a line with fresh catalog data.
    ///
    /// Quantity is untouched. Products not in the cart are ignored.
    pub fn refresh_product(&mut self, product: Product) -> Option<CartChange> {
        let idx = self.position(product.id)?;
        let item = &mut self.items[idx];
        if item.product == product {
            return None;
        }
        let product_id = product.id;
        item.product = product;
        Some(CartChange::ProductRefreshed { product_id })
    }

    pub fn totals(&self) -> CartTotals {
        self.items.iter().fold(CartTotals::default(), |acc, item| CartTotals {
            item_count: acc.item_count + u64::from(item.quantity),
            amount: acc.amount.saturating_add(item.line_total()),
        })
    }
}
