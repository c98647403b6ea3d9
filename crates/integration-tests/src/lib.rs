//! Integration tests for Kacamata.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kacamata-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `client_state` - Stores persisting through the file backend
//! - `translation` - Localized product data end to end
//!
//! Every test runs against a fresh temporary state directory; nothing
//! outside it is touched.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use kacamata_core::{LocalizedText, ProductId, ProductSnapshot, Translation};
use kacamata_storefront::{ClientState, StorageBackend, StorefrontConfig};
use rust_decimal::Decimal;

/// Debounce used by fixtures.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Configuration for a file-backed state directory.
#[must_use]
pub fn file_config(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        storage: StorageBackend::File,
        state_dir: dir.to_path_buf(),
        persist_debounce: DEBOUNCE,
        ..StorefrontConfig::default()
    }
}

/// Open and hydrate every store over a file-backed state directory.
///
/// # Panics
///
/// Panics if the directory cannot be used.
#[must_use]
pub fn open_state(dir: &Path) -> ClientState {
    let mut state = ClientState::open(&file_config(dir))
        .unwrap_or_else(|e| panic!("failed to open state in {}: {e}", dir.display()));
    state.hydrate_all();
    state
}

/// A priced product with a bilingual name.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
pub fn product(id: &str, en: &str, id_name: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot {
        name: Some(Translation::Localized(LocalizedText {
            en: Some(en.to_owned()),
            id: Some(id_name.to_owned()),
        })),
        slug: Some(id.to_owned()),
        price: Some(Decimal::new(price, 0)),
        ..ProductSnapshot::new(product_id(id))
    }
}

/// Parse a product ID.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
pub fn product_id(id: &str) -> ProductId {
    ProductId::parse(id).unwrap_or_else(|e| panic!("bad fixture id {id:?}: {e}"))
}

/// Read a stored key from a state directory as JSON.
///
/// Returns `None` if the file does not exist.
///
/// # Panics
///
/// Panics if the file exists but cannot be read or parsed.
#[must_use]
pub fn read_key(dir: &Path, key: &str) -> Option<serde_json::Value> {
    let path = dir.join(format!("{key}.json"));
    match std::fs::read_to_string(&path) {
        Ok(raw) => Some(
            serde_json::from_str(&raw)
                .unwrap_or_else(|e| panic!("{} is not JSON: {e}", path.display())),
        ),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => panic!("failed to read {}: {e}", path.display()),
    }
}

/// Write raw text under a stored key.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_key(dir: &Path, key: &str, raw: &str) {
    let path = dir.join(format!("{key}.json"));
    std::fs::write(&path, raw).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
