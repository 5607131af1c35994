//! Query parameter types for API handlers.

use rust_decimal::Decimal;
use serde::Deserialize;
use storefront_core::catalog::{ProductFilter, ProductSort};
use storefront_core::types::DbId;

/// `GET /products?active=&category=&search=&minPrice=&maxPrice=&sort=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub active: Option<bool>,
    pub category: Option<DbId>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<String>,
}

impl ProductListParams {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            active: self.active,
            category: self.category,
            search: self.search.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }

    pub fn sort(&self) -> ProductSort {
        self.sort
            .as_deref()
            .map(ProductSort::parse)
            .unwrap_or_default()
    }
}

/// `GET /categories?active=`
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    #[serde(default)]
    pub active: bool,
}
