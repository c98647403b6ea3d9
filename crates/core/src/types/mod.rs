//! Core types for Kacamata.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod price;
pub mod product;
pub mod translation;

pub use id::*;
pub use locale::Locale;
pub use price::{CurrencyCode, Price};
pub use product::ProductSnapshot;
pub use translation::{
    LocalizedText, Translation, has_translation, is_valid_translation, resolve, to_translation,
};
