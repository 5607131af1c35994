//! Storefront domain types and the session cart.
//!
//! Everything in this crate is synchronous and free of I/O. The event bus,
//! persistence, and HTTP layers build on top of it.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod types;
