//! Client state shared across the storefront.

use std::sync::Arc;

use kacamata_core::Locale;

use crate::collections::{Cart, Compare, Wishlist};
use crate::config::StorefrontConfig;
use crate::storage::{self, SafeStorage, Storage, StorageError};
use crate::store::PersistedStore;

/// Persisted cart store.
pub type CartStore = PersistedStore<Cart>;
/// Persisted wishlist store.
pub type WishlistStore = PersistedStore<Wishlist>;
/// Persisted compare store.
pub type CompareStore = PersistedStore<Compare>;

/// The visitor's cart, wishlist, and compare list.
///
/// Built once at startup and handed to whatever needs it. All three stores
/// share one storage backend.
#[derive(Debug)]
pub struct ClientState {
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub compare: CompareStore,
    locale: Locale,
}

impl ClientState {
    /// Build unhydrated stores over the backend selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be opened.
    pub fn open(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let backend = storage::open(config)?;
        Ok(Self::with_storage(config, backend))
    }

    /// Build unhydrated stores over an existing backend.
    #[must_use]
    pub fn with_storage(config: &StorefrontConfig, backend: Arc<dyn Storage>) -> Self {
        let storage = SafeStorage::new(backend);
        Self {
            cart: PersistedStore::new(storage.clone(), config.persist_debounce),
            wishlist: PersistedStore::new(storage.clone(), config.persist_debounce),
            compare: PersistedStore::new(storage, config.persist_debounce),
            locale: config.locale,
        }
    }

    /// Hydrate every store.
    pub fn hydrate_all(&mut self) {
        self.cart.hydrate();
        self.wishlist.hydrate();
        self.compare.hydrate();
    }

    /// Write every store now.
    ///
    /// Returns whether all three writes succeeded.
    pub fn flush_all(&self) -> bool {
        let cart = self.cart.flush();
        let wishlist = self.wishlist.flush();
        let compare = self.compare.flush();
        cart && wishlist && compare
    }

    /// The configured UI locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kacamata_core::{ProductId, ProductSnapshot};

    use super::*;
    use crate::collections::{CartAction, WishlistAction, keys};
    use crate::config::StorageBackend;
    use crate::storage::MemoryStorage;

    #[tokio::test(start_paused = true)]
    async fn test_stores_share_backend_with_separate_keys() {
        let backend = MemoryStorage::new();
        let config = StorefrontConfig {
            storage: StorageBackend::Memory,
            locale: Locale::Id,
            ..StorefrontConfig::default()
        };
        let mut state = ClientState::with_storage(&config, Arc::new(backend.clone()));
        state.hydrate_all();

        let product = ProductSnapshot::new(ProductId::parse("a").unwrap());
        state.cart.dispatch(CartAction::Add(product.clone()));
        state.wishlist.dispatch(WishlistAction::Add(product));
        assert!(state.flush_all());

        assert_eq!(backend.write_count(keys::CART), 1);
        assert_eq!(backend.write_count(keys::WISHLIST), 1);
        assert_eq!(backend.write_count(keys::COMPARE), 1);
        assert_eq!(state.locale(), Locale::Id);
    }

    #[tokio::test]
    async fn test_open_disabled_storage() {
        let config = StorefrontConfig {
            storage: StorageBackend::Disabled,
            ..StorefrontConfig::default()
        };
        let mut state = ClientState::open(&config).unwrap();
        state.hydrate_all();
        assert!(state.cart.snapshot().is_empty());
        assert!(!state.flush_all());
    }
}
