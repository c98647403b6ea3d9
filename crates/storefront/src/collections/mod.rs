//! Client-side product collections: cart, wishlist, and compare.
//!
//! Each collection is an ordered list of items driven by a pure reducer.
//! A [`Collection`] ties together the item type, the action type, the
//! reducer, the storage key, and the sanitizer applied to stored data.
//! [`PersistedStore`](crate::store::PersistedStore) adds hydration and
//! debounced persistence on top.

pub mod cart;
pub mod compare;
pub mod keys;
pub mod sanitize;
pub mod wishlist;

use std::fmt;

use kacamata_core::{ProductId, ProductSnapshot};
use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartAction, CartItem, CartState};
pub use compare::{Compare, CompareAction, CompareState};
pub use wishlist::{Wishlist, WishlistAction, WishlistState};

/// An entry in a collection.
pub trait CollectionItem {
    /// The product this entry refers to.
    fn product_id(&self) -> &ProductId;
}

impl CollectionItem for ProductSnapshot {
    fn product_id(&self) -> &ProductId {
        &self.id
    }
}

/// The in-memory state of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> CollectionState<T> {
    /// Create a state holding `items`.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: CollectionItem + Clone> CollectionState<T> {
    /// Whether any entry refers to `id`.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product_id() == id)
    }

    /// A copy of this state with `item` appended.
    #[must_use]
    pub fn with(&self, item: T) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// A copy of this state without any entry referring to `id`.
    #[must_use]
    pub fn without(&self, id: &ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.product_id() != id)
                .cloned()
                .collect(),
        }
    }
}

/// A kind of persisted collection.
pub trait Collection: Send + Sync + 'static {
    /// Entry type.
    type Item: CollectionItem
        + Clone
        + PartialEq
        + Serialize
        + fmt::Debug
        + Send
        + Sync
        + 'static;

    /// Action type consumed by [`reduce`](Self::reduce).
    type Action: fmt::Debug;

    /// Name used in logs.
    const NAME: &'static str;

    /// Storage key holding the JSON array of entries.
    const STORAGE_KEY: &'static str;

    /// Apply `action` to `state`, returning the next state.
    fn reduce(state: &CollectionState<Self::Item>, action: Self::Action)
    -> CollectionState<Self::Item>;

    /// The action that replaces the whole sequence.
    fn load(items: Vec<Self::Item>) -> Self::Action;

    /// Short label for `action` in logs, without its payload.
    fn action_kind(action: &Self::Action) -> &'static str;

    /// Turn untrusted stored JSON into entries, dropping invalid ones.
    fn sanitize(raw: serde_json::Value) -> Vec<Self::Item>;
}
