//! Persisted collection stores.
//!
//! A [`PersistedStore`] owns one collection's state. Actions are reduced
//! synchronously, in dispatch order, and the result is published on a
//! `watch` channel. After [`hydrate`](PersistedStore::hydrate) a background
//! task mirrors the state to storage:
//!
//! 1. Wait for a change.
//! 2. Wait until no further change arrives for the debounce window; every
//!    change restarts the timer.
//! 3. Serialize whatever the channel holds at that moment and write it.
//!
//! Because the task reads the channel's current value rather than a queued
//! copy, a burst of actions produces one write containing the final state.
//!
//! Nothing is written before hydration, so an empty initial state never
//! overwrites saved data. Dropping the store closes the channel; the task
//! then exits and a pending write is discarded. Call
//! [`flush`](PersistedStore::flush) first when the latest state must land.

use std::marker::PhantomData;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::collections::{Collection, CollectionState};
use crate::storage::{SafeParse, SafeStorage, safe_json_parse};

/// Default delay between the last change and the persistence write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A collection held in memory and mirrored to storage.
#[derive(Debug)]
pub struct PersistedStore<C: Collection> {
    state: watch::Sender<CollectionState<C::Item>>,
    storage: SafeStorage,
    debounce: Duration,
    hydrated: bool,
    persister: Option<JoinHandle<()>>,
    collection: PhantomData<C>,
}

impl<C: Collection> PersistedStore<C> {
    /// Create an empty, unhydrated store.
    #[must_use]
    pub fn new(storage: SafeStorage, debounce: Duration) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            state,
            storage,
            debounce,
            hydrated: false,
            persister: None,
            collection: PhantomData,
        }
    }

    /// Whether [`hydrate`](Self::hydrate) has run.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CollectionState<C::Item> {
        self.state.borrow().clone()
    }

    /// Run `f` against the current state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&CollectionState<C::Item>) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<C::Item>> {
        self.state.subscribe()
    }

    /// Apply `action` to the current state.
    ///
    /// Subscribers are only notified when the state actually changes.
    pub fn dispatch(&self, action: C::Action) {
        let kind = C::action_kind(&action);
        self.state.send_if_modified(|current| {
            let next = C::reduce(current, action);
            let changed = next != *current;
            debug!(collection = C::NAME, action = kind, items = next.len(), changed, "Dispatched action");
            if changed {
                *current = next;
            }
            changed
        });
    }

    /// Load saved state and start persisting changes.
    ///
    /// Runs at most once; later calls are ignored. Unreadable storage and
    /// malformed data both hydrate to an empty collection. Outside a tokio
    /// runtime no persister is started and the store stays memory-only
    /// apart from explicit [`flush`](Self::flush) calls.
    #[instrument(skip(self), fields(collection = C::NAME, key = C::STORAGE_KEY))]
    pub fn hydrate(&mut self) {
        if self.hydrated {
            debug!("Already hydrated");
            return;
        }

        let items = self.read_saved();
        info!(items = items.len(), "Hydrated from storage");
        self.dispatch(C::load(items));
        self.hydrated = true;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let rx = self.state.subscribe();
                let storage = self.storage.clone();
                let debounce = self.debounce;
                self.persister = Some(handle.spawn(run_persister::<C>(rx, storage, debounce)));
            }
            Err(_) => {
                warn!("No async runtime, changes will not be persisted automatically");
            }
        }
    }

    /// Write the current state now.
    ///
    /// Returns whether a write happened. Before hydration nothing is
    /// written.
    pub fn flush(&self) -> bool {
        if !self.hydrated {
            debug!(collection = C::NAME, "Not hydrated, skipping flush");
            return false;
        }
        write_state::<C>(&self.storage, &self.state.borrow())
    }

    fn read_saved(&self) -> Vec<C::Item> {
        let Some(raw) = self.storage.get(C::STORAGE_KEY) else {
            return Vec::new();
        };

        match safe_json_parse::<Value>(&raw) {
            SafeParse::Parsed(value) => C::sanitize(value),
            SafeParse::Invalid => {
                warn!("Stored value is not valid JSON, starting empty");
                Vec::new()
            }
        }
    }
}

impl<C: Collection> Drop for PersistedStore<C> {
    fn drop(&mut self) {
        if let Some(persister) = self.persister.take() {
            persister.abort();
        }
    }
}

fn write_state<C: Collection>(storage: &SafeStorage, state: &CollectionState<C::Item>) -> bool {
    let written = storage.set_json(C::STORAGE_KEY, &state.items);
    if written {
        debug!(
            collection = C::NAME,
            items = state.items.len(),
            "Persisted collection"
        );
    }
    written
}

/// Mirror state changes to storage until the store is dropped.
async fn run_persister<C: Collection>(
    mut rx: watch::Receiver<CollectionState<C::Item>>,
    storage: SafeStorage,
    debounce: Duration,
) {
    while rx.changed().await.is_ok() {
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = tokio::time::sleep(debounce) => break,
            }
        }

        write_state::<C>(&storage, &rx.borrow_and_update());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use kacamata_core::{ProductId, ProductSnapshot};
    use serde_json::json;

    use super::*;
    use crate::collections::{Cart, CartAction, Compare, CompareAction, keys};
    use crate::storage::{MemoryStorage, Storage, UnavailableStorage};

    const WINDOW: Duration = DEFAULT_DEBOUNCE;

    fn product(id: &str) -> ProductSnapshot {
        ProductSnapshot::new(ProductId::parse(id).unwrap())
    }

    fn cart_store(backend: &MemoryStorage) -> PersistedStore<Cart> {
        PersistedStore::new(SafeStorage::new(Arc::new(backend.clone())), WINDOW)
    }

    fn stored(backend: &MemoryStorage, key: &str) -> serde_json::Value {
        serde_json::from_str(&backend.get_item(key).unwrap().unwrap()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydrate_loads_sanitized_items() {
        let backend = MemoryStorage::new();
        backend
            .set_item(
                keys::CART,
                r#"[{"id":"a","quantity":"2"},{"quantity":1},"junk"]"#,
            )
            .unwrap();

        let mut store = cart_store(&backend);
        assert!(store.snapshot().is_empty());

        store.hydrate();
        let state = store.snapshot();
        assert_eq!(state.len(), 1);
        assert_eq!(state.items[0].quantity, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydrate_corrupted_json_is_empty() {
        let backend = MemoryStorage::new();
        backend.set_item(keys::CART, "not-json").unwrap();

        let mut store = cart_store(&backend);
        store.hydrate();
        assert!(store.is_hydrated());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydrate_runs_once() {
        let backend = MemoryStorage::new();
        backend.set_item(keys::CART, r#"[{"id":"a"}]"#).unwrap();

        let mut store = cart_store(&backend);
        store.hydrate();
        store.dispatch(CartAction::Add(product("b")));
        store.hydrate();

        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_writes_before_hydration() {
        let backend = MemoryStorage::new();
        backend.set_item(keys::CART, r#"[{"id":"saved"}]"#).unwrap();

        let store = cart_store(&backend);
        store.dispatch(CartAction::Add(product("a")));
        assert!(!store.flush());
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(backend.write_count(keys::CART), 1);
        assert_eq!(stored(&backend, keys::CART), json!([{"id": "saved"}]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_changes_writes_once() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();

        store.dispatch(CartAction::Add(product("a")));
        store.dispatch(CartAction::Add(product("b")));
        store.dispatch(CartAction::Remove(ProductId::parse("a").unwrap()));
        store.dispatch(CartAction::Add(product("c")));

        tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

        assert_eq!(backend.write_count(keys::CART), 1);
        let ids: Vec<_> = stored(&backend, keys::CART)
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_change_restarts_the_timer() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();

        store.dispatch(CartAction::Add(product("a")));
        tokio::time::sleep(Duration::from_millis(200)).await;
        store.dispatch(CartAction::Add(product("b")));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(backend.write_count(keys::CART), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(backend.write_count(keys::CART), 1);
        assert_eq!(stored(&backend, keys::CART).as_array().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_write_separately() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();

        store.dispatch(CartAction::Add(product("a")));
        tokio::time::sleep(WINDOW * 2).await;
        store.dispatch(CartAction::Add(product("b")));
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(backend.write_count(keys::CART), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_noop_actions_do_not_write() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();

        store.dispatch(CartAction::Remove(ProductId::parse("missing").unwrap()));
        store.dispatch(CartAction::Update {
            id: ProductId::parse("missing").unwrap(),
            quantity: 2,
            selected_size: String::new(),
            selected_color: String::new(),
        });
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(backend.write_count(keys::CART), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_write() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();
        store.dispatch(CartAction::Add(product("a")));
        drop(store);

        tokio::time::sleep(WINDOW * 2).await;
        assert_eq!(backend.write_count(keys::CART), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_immediately() {
        let backend = MemoryStorage::new();
        let mut store = PersistedStore::<Compare>::new(
            SafeStorage::new(Arc::new(backend.clone())),
            WINDOW,
        );
        store.hydrate();
        store.dispatch(CompareAction::Add(product("a")));

        assert!(store.flush());
        assert_eq!(stored(&backend, keys::COMPARE), json!([{"id": "a"}]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_storage_degrades_to_memory() {
        let mut store =
            PersistedStore::<Cart>::new(SafeStorage::new(Arc::new(UnavailableStorage)), WINDOW);
        store.hydrate();
        store.dispatch(CartAction::Add(product("a")));
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(store.snapshot().len(), 1);
        assert!(!store.flush());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_changes() {
        let backend = MemoryStorage::new();
        let mut store = cart_store(&backend);
        store.hydrate();
        let mut rx = store.subscribe();

        store.dispatch(CartAction::Add(product("a")));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }

    #[test]
    fn test_hydrate_without_runtime() {
        let backend = MemoryStorage::new();
        backend.set_item(keys::CART, r#"[{"id":"a"}]"#).unwrap();

        let mut store = cart_store(&backend);
        store.hydrate();
        store.dispatch(CartAction::Add(product("b")));
        assert!(store.flush());

        assert_eq!(stored(&backend, keys::CART).as_array().unwrap().len(), 2);
    }
}
