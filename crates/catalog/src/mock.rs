//! In-memory catalog seeded with the storefront's static product data.

use async_trait::async_trait;
use rust_decimal::Decimal;
use storefront_core::catalog::{Category, CategoryRef, Product, ProductFilter};
use storefront_core::types::DbId;

use crate::error::CatalogError;
use crate::source::CatalogSource;

/// A [`CatalogSource`] backed by fixed vectors.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl MockCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// The demo catalog: four categories, eight products.
    pub fn storefront() -> Self {
        let categories = vec![
            category(1, "Electronics", "Latest gadgets and devices", 0),
            category(2, "Fashion", "Trendy clothing and accessories", 1),
            category(3, "Home & Garden", "Everything for your home", 2),
            category(4, "Sports", "Sports equipment and gear", 3),
        ];

        #[rustfmt::skip]
        let rows: [(DbId, &str, &str, i64, u32, &str, usize); 8] = [
            (1, "Premium Wireless Headphones", "High-quality wireless headphones with noise cancellation", 29999, 15, "photo-1505740420928-5e560c06d30e", 0),
            (2, "Smart Watch Pro", "Advanced smartwatch with health monitoring features", 44999, 20, "photo-1523275335684-37898b6baf30", 0),
            (3, "Designer Sunglasses", "Stylish sunglasses with UV protection", 15999, 30, "photo-1572635196237-14b3f281503f", 1),
            (4, "Leather Wallet", "Genuine leather wallet with multiple compartments", 8999, 25, "photo-1627123424574-724758594e93", 1),
            (5, "Running Shoes", "Comfortable running shoes with excellent cushioning", 12999, 18, "photo-1542291026-7eec264c27ff", 3),
            (6, "Coffee Maker", "Premium coffee maker with multiple brewing options", 19999, 12, "photo-1517668808822-9ebb02f2a0e6", 2),
            (7, "Bluetooth Speaker", "Portable bluetooth speaker with rich sound", 7999, 35, "photo-1608043152269-423dbba4e7e1", 0),
            (8, "Yoga Mat", "Non-slip yoga mat with carrying strap", 4999, 40, "photo-1601925260368-ae2f83cf8b7f", 3),
        ];

        let products = rows
            .into_iter()
            .map(|(id, name, description, cents, stock, image, cat)| Product {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price: Decimal::new(cents, 2),
                stock,
                image_url: Some(format!("https://images.unsplash.com/{image}?w=400")),
                category: Some(CategoryRef::from(&categories[cat])),
                is_active: true,
            })
            .collect();

        Self::new(products, categories)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

fn category(id: DbId, name: &str, description: &str, display_order: i32) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        image_url: None,
        is_active: true,
        display_order,
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        Ok(filter.apply(&self.products))
    }

    async fn get_product(&self, id: DbId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                entity: "Product",
                id,
            })
    }

    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, CatalogError> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| !active_only || c.is_active)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }

    async fn get_category(&self, id: DbId) -> Result<Category, CatalogError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                entity: "Category",
                id,
            })
    }
}
