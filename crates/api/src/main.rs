use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_api::config::ServerConfig;
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_catalog::{CatalogSource, HttpCatalog, MockCatalog};
use storefront_events::{CartPersistence, CartStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Catalog ---
    let catalog: Arc<dyn CatalogSource> = match &config.catalog_url {
        Some(url) => {
            tracing::info!(%url, "Using remote catalog");
            Arc::new(HttpCatalog::new(url.clone()))
        }
        None => {
            tracing::info!("Using built-in mock catalog");
            Arc::new(MockCatalog::storefront())
        }
    };

    // --- Session cart ---
    let mut store = CartStore::new();
    if let Some(path) = &config.cart_snapshot_path {
        match CartPersistence::load(path).await {
            Ok(Some(snapshot)) => {
                store.restore(snapshot);
                tracing::info!(
                    path = %path.display(),
                    item_count = store.totals().item_count,
                    "Cart restored from snapshot"
                );
            }
            Ok(None) => tracing::info!(path = %path.display(), "No cart snapshot, starting empty"),
            // A bad snapshot must not keep the storefront from starting.
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable cart snapshot"),
        }
    }

    let persistence_rx = config
        .cart_snapshot_path
        .clone()
        .map(|path| (path, store.subscribe()));
    let cart = store.into_shared();

    // Keep one strong handle so the final state can be flushed after the
    // router is gone.
    let persistence = persistence_rx.map(|(path, rx)| {
        let handle = tokio::spawn(CartPersistence::run(
            path.clone(),
            Arc::downgrade(&cart),
            rx,
        ));
        (path, Arc::clone(&cart), handle)
    });

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        cart,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    // Flushing releases the last store handle, which closes the cart event
    // bus and ends the persistence task.
    if let Some((path, store, handle)) = persistence {
        match CartPersistence::flush(&path, store).await {
            Ok(()) => tracing::info!(path = %path.display(), "Final cart snapshot saved"),
            Err(e) => tracing::error!(error = %e, "Failed to save final cart snapshot"),
        }

        match tokio::time::timeout(Duration::from_secs(5), handle).await {
            Ok(Ok(())) => tracing::info!("Cart persistence stopped"),
            Ok(Err(e)) => tracing::error!(error = %e, "Cart persistence task failed"),
            Err(_) => tracing::warn!("Cart persistence did not stop within 5s"),
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
