//! Product catalog access.
//!
//! The cart never talks to the catalog itself: callers resolve products
//! through a [`CatalogSource`] and hand the resulting values to the store.
//!
//! - [`MockCatalog`]: the storefront's built-in static catalog.
//! - [`HttpCatalog`]: REST client for a remote catalog service.

pub mod error;
pub mod http;
pub mod mock;
pub mod source;

pub use error::CatalogError;
pub use http::HttpCatalog;
pub use mock::MockCatalog;
pub use source::CatalogSource;
