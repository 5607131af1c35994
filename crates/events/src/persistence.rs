//! Cart snapshot persistence.
//!
//! [`CartPersistence`] subscribes to a store's [`EventBus`](crate::bus::EventBus)
//! and rewrites a JSON snapshot file after every change, playing the part
//! of the browser's local storage. It runs as a long-lived background task
//! and shuts down when the bus sender is dropped.

use std::path::{Path, PathBuf};
use std::sync::Weak;

use tokio::sync::{broadcast, RwLock};

use crate::bus::CartEvent;
use crate::store::{CartSnapshot, CartStore, SharedCartStore};

/// Errors reading or writing a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Background service that keeps a cart snapshot file up to date.
pub struct CartPersistence;

impl CartPersistence {
    /// Run the persistence loop.
    ///
    /// On every received event the current contents of `store` are written
    /// to `path`. Write failures are logged and the loop keeps going. The
    /// store is held weakly so this task never keeps the session alive; the
    /// loop exits when the channel is closed or the store is gone. Changes
    /// still queued at that point are covered by [`CartPersistence::flush`].
    ///
    /// The read guard is held while the file is written, so a flush under
    /// the write lock never overlaps a background save.
    pub async fn run(
        path: PathBuf,
        store: Weak<RwLock<CartStore>>,
        mut receiver: broadcast::Receiver<CartEvent>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let Some(strong) = store.upgrade() else {
                        tracing::info!("Cart store dropped, persistence shutting down");
                        break;
                    };
                    let guard = strong.read().await;
                    let result = Self::save(&path, &guard.snapshot()).await;
                    drop(guard);
                    drop(strong);
                    if let Err(e) = result {
                        tracing::error!(
                            error = %e,
                            event_type = event.kind.event_type(),
                            "Failed to persist cart snapshot"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // The next event still triggers a full snapshot, so
                    // skipped events lose nothing.
                    tracing::warn!(skipped = n, "Cart persistence lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Cart event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write the final state of `store` and release the handle.
    ///
    /// Call this at shutdown with the last strong handle. Dropping it closes
    /// the event bus, which stops the [`run`](Self::run) loop.
    pub async fn flush(path: &Path, store: SharedCartStore) -> Result<(), PersistenceError> {
        let guard = store.write().await;
        let result = Self::save(path, &guard.snapshot()).await;
        drop(guard);
        drop(store);
        result
    }

    /// Write a snapshot, replacing the file atomically via a temp file.
    pub async fn save(path: &Path, snapshot: &CartSnapshot) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| {
            PersistenceError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let tmp = path.with_extension("json.tmp");
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

        tracing::debug!(path = %path.display(), lines = snapshot.items.len(), "Cart snapshot saved");
        Ok(())
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    pub async fn load(path: &Path) -> Result<Option<CartSnapshot>, PersistenceError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }
}
