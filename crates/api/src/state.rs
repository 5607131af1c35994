use std::sync::Arc;

use storefront_catalog::CatalogSource;
use storefront_events::SharedCartStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where product and category data comes from.
    pub catalog: Arc<dyn CatalogSource>,
    /// The one cart of this browsing session.
    pub cart: SharedCartStore,
}
