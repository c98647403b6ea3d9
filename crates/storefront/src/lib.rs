//! Kacamata Storefront client state.
//!
//! Keeps a visitor's cart, wishlist, and compare list in memory and mirrors
//! them to durable storage.
//!
//! # Architecture
//!
//! - [`collections`] - Item types, pure reducers, and sanitizers per collection
//! - [`store`] - Hydration and debounced persistence around a reducer
//! - [`storage`] - Key-value backends and the failure-tolerant wrapper
//! - [`state`] - The three stores bundled for injection at startup
//! - [`config`] - Environment-driven configuration
//!
//! Storage problems never reach callers: unreadable or malformed data
//! hydrates to an empty collection and failed writes are logged and
//! skipped.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collections;
pub mod config;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{ConfigError, StorageBackend, StorefrontConfig};
pub use state::ClientState;
pub use store::PersistedStore;
