/// Catalog identifiers for products and categories.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts. Exact decimal arithmetic, no currency attached.
pub type Money = rust_decimal::Decimal;
