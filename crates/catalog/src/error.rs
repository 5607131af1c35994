use storefront_core::types::DbId;

/// Errors from a [`CatalogSource`](crate::CatalogSource).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The requested product or category does not exist.
    #[error("{entity} with id {id} not found in catalog")]
    NotFound { entity: &'static str, id: DbId },

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog service returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
