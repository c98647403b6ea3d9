//! Side-by-side product comparison list.

use kacamata_core::{ProductId, ProductSnapshot};

use super::{Collection, CollectionState, keys, sanitize};

/// Compare actions.
#[derive(Debug, Clone)]
pub enum CompareAction {
    Add(ProductSnapshot),
    Remove(ProductId),
    Clear,
    Load(Vec<ProductSnapshot>),
}

/// Compare state.
pub type CompareState = CollectionState<ProductSnapshot>;

/// The compare collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compare;

impl Collection for Compare {
    type Item = ProductSnapshot;
    type Action = CompareAction;

    const NAME: &'static str = "compare";
    const STORAGE_KEY: &'static str = keys::COMPARE;

    fn reduce(state: &CompareState, action: CompareAction) -> CompareState {
        match action {
            CompareAction::Add(product) => state.with(product),
            CompareAction::Remove(id) => state.without(&id),
            CompareAction::Clear => CompareState::default(),
            CompareAction::Load(items) => CompareState::new(items),
        }
    }

    fn load(items: Vec<ProductSnapshot>) -> CompareAction {
        CompareAction::Load(items)
    }

    fn action_kind(action: &CompareAction) -> &'static str {
        match action {
            CompareAction::Add(_) => "add",
            CompareAction::Remove(_) => "remove",
            CompareAction::Clear => "clear",
            CompareAction::Load(_) => "load",
        }
    }

    fn sanitize(raw: serde_json::Value) -> Vec<ProductSnapshot> {
        sanitize::sanitize_products(raw)
    }
}
