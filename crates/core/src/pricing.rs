//! Order summary shown next to the cart (checkout stub).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::cart::CartTotals;
use crate::types::Money;

/// Flat sales tax applied to the subtotal: 10%.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Shipping is free for every order.
pub const SHIPPING: Decimal = Decimal::ZERO;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn from_totals(totals: &CartTotals) -> Self {
        let subtotal = totals.amount;
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            shipping: SHIPPING,
            tax,
            total: subtotal.saturating_add(SHIPPING).saturating_add(tax),
        }
    }
}
