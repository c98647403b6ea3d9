//! Compare list commands.

use kacamata_core::Locale;
use kacamata_storefront::collections::CompareAction;
use kacamata_storefront::state::CompareStore;
use tracing::info;

use super::{CommandError, ProductArgs, list_products, parse_id, persist};

/// Print every product being compared.
///
/// # Errors
///
/// Returns an error if the products cannot be encoded.
pub fn list(store: &CompareStore, locale: Locale) -> Result<(), CommandError> {
    list_products(store, locale)
}

/// Add a product to the comparison.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid.
pub fn add(store: &CompareStore, product: ProductArgs) -> Result<(), CommandError> {
    let product = product.into_snapshot()?;
    info!(id = %product.id, "Adding to compare");
    store.dispatch(CompareAction::Add(product));
    persist(store);
    Ok(())
}

/// Remove a product from the comparison.
///
/// # Errors
///
/// Returns an error if the ID is empty.
pub fn remove(store: &CompareStore, id: &str) -> Result<(), CommandError> {
    let id = parse_id(id)?;
    info!(id = %id, "Removing from compare");
    store.dispatch(CompareAction::Remove(id));
    persist(store);
    Ok(())
}

/// Empty the comparison.
pub fn clear(store: &CompareStore) {
    info!("Clearing compare list");
    store.dispatch(CompareAction::Clear);
    persist(store);
}
