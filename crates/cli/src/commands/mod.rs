//! Command implementations.
//!
//! Mutating commands hydrate the affected store, dispatch one action, and
//! flush immediately: the process exits long before a debounced write
//! would fire.

pub mod cart;
pub mod compare;
pub mod translate;
pub mod wishlist;

use clap::Args;
use kacamata_core::{IdError, Locale, ProductId, ProductSnapshot, Translation, to_translation};
use kacamata_storefront::PersistedStore;
use kacamata_storefront::collections::Collection;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid product id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Product fields accepted by `add` commands.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product ID
    #[arg(long)]
    pub id: String,

    /// English name
    #[arg(long)]
    pub name: Option<String>,

    /// Indonesian name
    #[arg(long)]
    pub name_id: Option<String>,

    /// URL slug
    #[arg(long)]
    pub slug: Option<String>,

    /// Brand
    #[arg(long)]
    pub brand: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Unit price in rupiah
    #[arg(long)]
    pub price: Option<Decimal>,
}

impl ProductArgs {
    /// Build the snapshot stored in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty.
    pub fn into_snapshot(self) -> Result<ProductSnapshot, CommandError> {
        let name = match (self.name, self.name_id) {
            (None, None) => None,
            (en, id) => {
                let mut name = to_translation(en.as_deref(), None);
                if let (Translation::Localized(text), Some(id)) = (&mut name, id) {
                    text.id = Some(id);
                }
                Some(name)
            }
        };

        Ok(ProductSnapshot {
            name,
            slug: self.slug,
            brand: self.brand,
            image: self.image,
            price: self.price,
            ..ProductSnapshot::new(ProductId::parse(self.id)?)
        })
    }
}

/// Parse a product ID argument.
fn parse_id(id: &str) -> Result<ProductId, CommandError> {
    Ok(ProductId::parse(id)?)
}

/// Persist a store after a mutation, warning if the write did not land.
fn persist<C: Collection>(store: &PersistedStore<C>) {
    if !store.flush() {
        warn!(collection = C::NAME, "Change was not saved to storage");
    }
}

/// Log every product in a wishlist-style store and print it as JSON.
fn list_products<C>(store: &PersistedStore<C>, locale: Locale) -> Result<(), CommandError>
where
    C: Collection<Item = ProductSnapshot>,
{
    let state = store.snapshot();
    for product in &state.items {
        info!(id = %product.id, name = product.display_name(locale), "{}", C::NAME);
    }
    print_json(&state.items)
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a line on stdout.
#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kacamata_core::LocalizedText;

    use super::*;

    fn args(id: &str) -> ProductArgs {
        ProductArgs {
            id: id.to_owned(),
            name: None,
            name_id: None,
            slug: None,
            brand: None,
            image: None,
            price: None,
        }
    }

    #[test]
    fn test_into_snapshot_minimal() {
        let product = args("p-1").into_snapshot().unwrap();
        assert_eq!(product, ProductSnapshot::new(ProductId::parse("p-1").unwrap()));
    }

    #[test]
    fn test_into_snapshot_bilingual_name() {
        let product = ProductArgs {
            name: Some("Sunglasses".to_owned()),
            name_id: Some("Kacamata Hitam".to_owned()),
            price: Some(Decimal::new(450_000, 0)),
            ..args("p-1")
        }
        .into_snapshot()
        .unwrap();

        assert_eq!(
            product.name,
            Some(Translation::Localized(LocalizedText {
                en: Some("Sunglasses".to_owned()),
                id: Some("Kacamata Hitam".to_owned()),
            }))
        );
        assert_eq!(product.display_name(Locale::Id), "Kacamata Hitam");
        assert_eq!(product.price, Some(Decimal::new(450_000, 0)));
    }

    #[test]
    fn test_into_snapshot_english_only_falls_back() {
        let product = ProductArgs {
            name: Some("Sunglasses".to_owned()),
            ..args("p-1")
        }
        .into_snapshot()
        .unwrap();
        assert_eq!(product.display_name(Locale::Id), "Sunglasses");
    }

    #[test]
    fn test_into_snapshot_rejects_empty_id() {
        assert!(matches!(
            args("").into_snapshot(),
            Err(CommandError::InvalidId(IdError::Empty))
        ));
    }
}
