//! Shopping cart.
//!
//! Every add creates a new line awaiting size and color selection; adding a
//! product that is already in the cart does not merge with the existing
//! line.

use kacamata_core::{CurrencyCode, Price, ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Collection, CollectionItem, CollectionState, keys, sanitize};

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(default)]
    pub selected_size: String,
    #[serde(default)]
    pub selected_color: String,
}

impl CartItem {
    /// A fresh line for `product`: quantity 1, nothing selected.
    #[must_use]
    pub const fn new(product: ProductSnapshot) -> Self {
        Self {
            product,
            quantity: 1,
            selected_size: String::new(),
            selected_color: String::new(),
        }
    }

    /// Unit price times quantity, if the product is priced.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product
            .price
            .map(|price| price * Decimal::from(self.quantity))
    }
}

impl CollectionItem for CartItem {
    fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Cart actions.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Append a new line for a product.
    Add(ProductSnapshot),
    /// Remove every line for a product.
    Remove(ProductId),
    /// Replace the mutable fields of every line for a product.
    Update {
        id: ProductId,
        quantity: u32,
        selected_size: String,
        selected_color: String,
    },
    /// Replace all lines.
    Load(Vec<CartItem>),
}

/// Cart state.
pub type CartState = CollectionState<CartItem>;

impl CartState {
    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals over priced lines, in rupiah.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount = self
            .items
            .iter()
            .filter_map(CartItem::line_total)
            .sum::<Decimal>();
        Price::new(amount, CurrencyCode::IDR)
    }
}

/// The cart collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cart;

impl Collection for Cart {
    type Item = CartItem;
    type Action = CartAction;

    const NAME: &'static str = "cart";
    const STORAGE_KEY: &'static str = keys::CART;

    fn reduce(state: &CartState, action: CartAction) -> CartState {
        match action {
            CartAction::Add(product) => state.with(CartItem::new(product)),
            CartAction::Remove(id) => state.without(&id),
            CartAction::Update {
                id,
                quantity,
                selected_size,
                selected_color,
            } => CartState::new(
                state
                    .items
                    .iter()
                    .map(|item| {
                        if item.product.id == id {
                            CartItem {
                                quantity: quantity.max(1),
                                selected_size: selected_size.clone(),
                                selected_color: selected_color.clone(),
                                ..item.clone()
                            }
                        } else {
                            item.clone()
                        }
                    })
                    .collect(),
            ),
            CartAction::Load(items) => CartState::new(items),
        }
    }

    fn load(items: Vec<CartItem>) -> CartAction {
        CartAction::Load(items)
    }

    fn action_kind(action: &CartAction) -> &'static str {
        match action {
            CartAction::Add(_) => "add",
            CartAction::Remove(_) => "remove",
            CartAction::Update { .. } => "update",
            CartAction::Load(_) => "load",
        }
    }

    fn sanitize(raw: serde_json::Value) -> Vec<CartItem> {
        sanitize::sanitize_cart(raw)
    }
}
