//! Product projections kept in client-side collections.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::locale::Locale;
use super::translation::{self, Translation};

/// The slice of a catalog product that cart, wishlist, and compare entries
/// carry.
///
/// Only `id` is required. Keys this type does not model are kept in
/// [`extra`](Self::extra) so a stored entry survives a read/write cycle
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price in rupiah.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::str_option"
    )]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductSnapshot {
    /// Create a snapshot carrying only an ID.
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            brand: None,
            image: None,
            price: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Display name for `locale`, or `""` when the product has none.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        translation::resolve(self.name.as_ref(), locale)
    }
}
