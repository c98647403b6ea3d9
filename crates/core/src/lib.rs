//! Kacamata Core - Shared types library.
//!
//! This crate provides common types used across all Kacamata components:
//! - `storefront` - Client-side collection state (cart, wishlist, compare)
//! - `cli` - Command-line tools for inspecting and editing persisted state
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no async runtime. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, locales, bilingual text, product snapshots, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
