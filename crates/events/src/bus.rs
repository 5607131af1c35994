//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`CartEvent`]s. Each
//! [`CartStore`](crate::store::CartStore) owns one; views and background
//! services subscribe to it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_core::cart::{CartChange, CartTotals};
use storefront_core::types::{DbId, Timestamp};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// CartEvent
// ---------------------------------------------------------------------------

/// Kind of change carried by a [`CartEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartEventKind {
    ItemAdded,
    QuantityUpdated,
    ItemRemoved,
    Cleared,
    ProductRefreshed,
    /// The whole cart was replaced from a snapshot.
    Restored,
}

impl CartEventKind {
    /// Dot-separated event name, e.g. `"cart.item_added"`.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::ItemAdded => "cart.item_added",
            Self::QuantityUpdated => "cart.quantity_updated",
            Self::ItemRemoved => "cart.item_removed",
            Self::Cleared => "cart.cleared",
            Self::ProductRefreshed => "cart.product_refreshed",
            Self::Restored => "cart.restored",
        }
    }
}

/// A change that happened to the session cart.
///
/// Carries the totals as they stood right after the change so that simple
/// views (the header badge) never need to read the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEvent {
    pub kind: CartEventKind,

    /// The affected product line, if the change concerned a single line.
    pub product_id: Option<DbId>,

    /// New quantity of the affected line, when it still exists.
    pub quantity: Option<u32>,

    /// Cart totals after the change.
    pub totals: CartTotals,

    /// When the change happened (UTC).
    pub timestamp: Timestamp,
}

impl CartEvent {
    pub fn new(kind: CartEventKind, totals: CartTotals) -> Self {
        Self {
            kind,
            product_id: None,
            quantity: None,
            totals,
            timestamp: Utc::now(),
        }
    }

    /// Build the event describing a [`CartChange`].
    pub fn from_change(change: CartChange, totals: CartTotals) -> Self {
        let (kind, quantity) = match change {
            CartChange::Added { quantity, .. } => (CartEventKind::ItemAdded, Some(quantity)),
            CartChange::QuantityChanged { quantity, .. } => {
                (CartEventKind::QuantityUpdated, Some(quantity))
            }
            CartChange::Removed { .. } => (CartEventKind::ItemRemoved, None),
            CartChange::Cleared => (CartEventKind::Cleared, None),
            CartChange::ProductRefreshed { .. } => (CartEventKind::ProductRefreshed, None),
        };

        Self {
            product_id: change.product_id(),
            quantity,
            ..Self::new(kind, totals)
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`CartEvent`].
///
/// # Usage
///
/// ```rust
/// use storefront_core::cart::CartTotals;
/// use storefront_events::bus::{CartEvent, CartEventKind, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(CartEvent::new(CartEventKind::Cleared, CartTotals::default()));
/// ```
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<CartEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: CartEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
