//! Storefront cart store and change notification.
//!
//! This crate provides the stateful half of the session cart:
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`CartEvent`]: the change notification published after every
//!   mutation that altered the cart.
//! - [`CartStore`]: the session-owned container wrapping
//!   [`storefront_core::cart::Cart`] and its bus.
//! - [`CartPersistence`]: background subscriber that snapshots the cart
//!   to a JSON file so a session can be resumed.

pub mod bus;
pub mod persistence;
pub mod store;

pub use bus::{CartEvent, CartEventKind, EventBus};
pub use persistence::{CartPersistence, PersistenceError};
pub use store::{CartSnapshot, CartStore, SharedCartStore};
