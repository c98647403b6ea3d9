//! Wishlist commands.

use kacamata_core::Locale;
use kacamata_storefront::collections::WishlistAction;
use kacamata_storefront::state::WishlistStore;
use tracing::info;

use super::{CommandError, ProductArgs, list_products, parse_id, persist};

/// Print every saved product.
///
/// # Errors
///
/// Returns an error if the products cannot be encoded.
pub fn list(store: &WishlistStore, locale: Locale) -> Result<(), CommandError> {
    list_products(store, locale)
}

/// Save a product.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid.
pub fn add(store: &WishlistStore, product: ProductArgs) -> Result<(), CommandError> {
    let product = product.into_snapshot()?;
    info!(id = %product.id, "Adding to wishlist");
    store.dispatch(WishlistAction::Add(product));
    persist(store);
    Ok(())
}

/// Remove a saved product.
///
/// # Errors
///
/// Returns an error if the ID is empty.
pub fn remove(store: &WishlistStore, id: &str) -> Result<(), CommandError> {
    let id = parse_id(id)?;
    info!(id = %id, "Removing from wishlist");
    store.dispatch(WishlistAction::Remove(id));
    persist(store);
    Ok(())
}
