//! Catalog entities (products, categories) and listing rules.
//!
//! The catalog is owned by an external service; these types mirror its JSON
//! contract (camelCase field names) so they can be deserialized directly
//! from `GET /products` and `GET /categories` responses.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Money};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A product category as listed by `GET /categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// The category summary embedded in a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: DbId,
    pub name: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A purchasable catalog entry.
///
/// Read-only from the cart's point of view: the cart stores a copy of the
/// record it was given and prices lines from that copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Whether the product can currently be put in a cart.
    pub fn is_available(&self) -> bool {
        self.is_active && self.stock > 0
    }
}

fn default_true() -> bool {
    true
}

/// Reject products that would break cart arithmetic or display.
pub fn validate_product(product: &Product) -> Result<(), CoreError> {
    if product.name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Product {} has an empty name",
            product.id
        )));
    }
    if product.price < Money::ZERO {
        return Err(CoreError::Validation(format!(
            "Product {} has a negative price ({})",
            product.id, product.price
        )));
    }
    Ok(())
}

/// Clamp a quantity chosen in the add-to-cart picker to `[1, stock]`.
///
/// Out-of-stock products still allow a selection of 1 so the picker never
/// shows zero.
pub fn clamp_selection(requested: u32, stock: u32) -> u32 {
    requested.clamp(1, stock.max(1))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Query options for `GET /products`.
///
/// Only one criterion applies per query. The first one present wins, in
/// field order: `active`, `category`, `search`, then the price range (which
/// needs both bounds).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub active: Option<bool>,
    pub category: Option<DbId>,
    pub search: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if self.active == Some(true) {
            return product.is_active;
        }
        if let Some(category_id) = self.category {
            return product.category.as_ref().map(|c| c.id) == Some(category_id);
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            return product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase());
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            return product.price >= min && product.price <= max;
        }
        true
    }

    /// Clone the products that pass this filter, keeping their order.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Ordering for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Alphabetical by name, case-insensitive.
    #[default]
    Name,
    PriceLow,
    PriceHigh,
}

impl ProductSort {
    /// Parse the `sort` query value. Unknown values fall back to [`ProductSort::Name`].
    pub fn parse(value: &str) -> Self {
        match value {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            _ => Self::Name,
        }
    }

    pub fn sort(self, products: &mut [Product]) {
        match self {
            Self::Name => products.sort_by_key(|p| p.name.to_lowercase()),
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}
