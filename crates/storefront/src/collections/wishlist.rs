//! Saved-for-later products.

use kacamata_core::{ProductId, ProductSnapshot};

use super::{Collection, CollectionState, keys, sanitize};

/// Wishlist actions.
#[derive(Debug, Clone)]
pub enum WishlistAction {
    Add(ProductSnapshot),
    Remove(ProductId),
    Load(Vec<ProductSnapshot>),
}

/// Wishlist state.
pub type WishlistState = CollectionState<ProductSnapshot>;

/// The wishlist collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wishlist;

impl Collection for Wishlist {
    type Item = ProductSnapshot;
    type Action = WishlistAction;

    const NAME: &'static str = "wishlist";
    const STORAGE_KEY: &'static str = keys::WISHLIST;

    fn reduce(state: &WishlistState, action: WishlistAction) -> WishlistState {
        match action {
            WishlistAction::Add(product) => state.with(product),
            WishlistAction::Remove(id) => state.without(&id),
            WishlistAction::Load(items) => WishlistState::new(items),
        }
    }

    fn load(items: Vec<ProductSnapshot>) -> WishlistAction {
        WishlistAction::Load(items)
    }

    fn action_kind(action: &WishlistAction) -> &'static str {
        match action {
            WishlistAction::Add(_) => "add",
            WishlistAction::Remove(_) => "remove",
            WishlistAction::Load(_) => "load",
        }
    }

    fn sanitize(raw: serde_json::Value) -> Vec<ProductSnapshot> {
        sanitize::sanitize_products(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductSnapshot {
        ProductSnapshot::new(ProductId::parse(id).unwrap())
    }

    #[test]
    fn test_action_kind() {
        assert_eq!(Wishlist::action_kind(&Wishlist::load(vec![product("a")])), "load");
        assert_eq!(Wishlist::action_kind(&WishlistAction::Remove(product("a").id)), "remove");
    }

    #[test]
    fn test_add_and_remove() {
        let state = Wishlist::reduce(&WishlistState::default(), WishlistAction::Add(product("a")));
        assert!(state.contains(&product("a").id));

        let state = Wishlist::reduce(&state, WishlistAction::Remove(product("a").id));
        assert!(state.is_empty());
    }

    #[test]
    fn test_add_keeps_duplicates() {
        let state = Wishlist::reduce(&WishlistState::default(), WishlistAction::Add(product("a")));
        let state = Wishlist::reduce(&state, WishlistAction::Add(product("a")));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_load() {
        let state = Wishlist::reduce(
            &WishlistState::default(),
            WishlistAction::Load(vec![product("a"), product("b")]),
        );
        assert_eq!(state.items, vec![product("a"), product("b")]);
    }
}
