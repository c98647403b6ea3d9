//! Cart commands.

use kacamata_core::Locale;
use kacamata_storefront::collections::CartAction;
use kacamata_storefront::state::CartStore;
use tracing::{info, warn};

use super::{CommandError, ProductArgs, parse_id, persist, print_json};

/// Print every cart line and log the totals.
///
/// # Errors
///
/// Returns an error if the lines cannot be encoded.
pub fn list(store: &CartStore, locale: Locale) -> Result<(), CommandError> {
    let state = store.snapshot();
    for line in &state.items {
        info!(
            id = %line.product.id,
            name = line.product.display_name(locale),
            quantity = line.quantity,
            size = %line.selected_size,
            color = %line.selected_color,
            "Cart line"
        );
    }
    info!(
        lines = state.len(),
        quantity = state.total_quantity(),
        subtotal = %state.subtotal().display(),
        "Cart totals"
    );
    print_json(&state.items)
}

/// Add a new line for a product.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid.
pub fn add(store: &CartStore, product: ProductArgs) -> Result<(), CommandError> {
    let product = product.into_snapshot()?;
    info!(id = %product.id, "Adding to cart");
    store.dispatch(CartAction::Add(product));
    persist(store);
    Ok(())
}

/// Remove every line for a product.
///
/// # Errors
///
/// Returns an error if the ID is empty.
pub fn remove(store: &CartStore, id: &str) -> Result<(), CommandError> {
    let id = parse_id(id)?;
    if !store.with_state(|state| state.contains(&id)) {
        warn!(id = %id, "Product is not in the cart");
        return Ok(());
    }
    info!(id = %id, "Removing from cart");
    store.dispatch(CartAction::Remove(id));
    persist(store);
    Ok(())
}

/// Update quantity and selections on every line for a product.
///
/// Options left unset keep the value of the first matching line.
///
/// # Errors
///
/// Returns an error if the ID is empty.
pub fn update(
    store: &CartStore,
    id: &str,
    quantity: Option<u32>,
    size: Option<String>,
    color: Option<String>,
) -> Result<(), CommandError> {
    let id = parse_id(id)?;
    let Some(current) = store.with_state(|state| {
        state
            .items
            .iter()
            .find(|line| line.product.id == id)
            .cloned()
    }) else {
        warn!(id = %id, "Product is not in the cart");
        return Ok(());
    };

    let action = CartAction::Update {
        quantity: quantity.unwrap_or(current.quantity),
        selected_size: size.unwrap_or(current.selected_size),
        selected_color: color.unwrap_or(current.selected_color),
        id,
    };
    info!(?action, "Updating cart");
    store.dispatch(action);
    persist(store);
    Ok(())
}
