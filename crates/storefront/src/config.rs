//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_STORAGE` - Storage backend: `file`, `memory`, or `disabled` (default: file)
//! - `STOREFRONT_STATE_DIR` - Directory for the file backend (default: .kacamata)
//! - `STOREFRONT_PERSIST_DEBOUNCE_MS` - Delay before a state change is written (default: 300)
//! - `STOREFRONT_STORAGE_QUOTA_BYTES` - Largest value a single key may hold (default: 5 MiB)
//! - `STOREFRONT_LOCALE` - UI locale, `en` or `id` (default: en; unknown values fall back to en)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use kacamata_core::Locale;
use thiserror::Error;

const DEFAULT_STATE_DIR: &str = ".kacamata";
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend mirrors client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One file per key under the state directory.
    #[default]
    File,
    /// Process memory only.
    Memory,
    /// No durable storage; state lives in memory and is never written.
    Disabled,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "disabled" | "none" => Ok(Self::Disabled),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Storefront client-state configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storage backend
    pub storage: StorageBackend,
    /// Directory for the file backend
    pub state_dir: PathBuf,
    /// Debounce window for persistence writes
    pub persist_debounce: Duration,
    /// Largest value a single storage key may hold, in bytes
    pub storage_quota_bytes: usize,
    /// UI locale
    pub locale: Locale,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            persist_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            locale: Locale::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage = match lookup("STOREFRONT_STORAGE") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_STORAGE".to_string(), e))?,
            None => defaults.storage,
        };
        let state_dir = lookup("STOREFRONT_STATE_DIR").map_or(defaults.state_dir, PathBuf::from);
        let persist_debounce = match lookup("STOREFRONT_PERSIST_DEBOUNCE_MS") {
            Some(value) => Duration::from_millis(parse_var("STOREFRONT_PERSIST_DEBOUNCE_MS", &value)?),
            None => defaults.persist_debounce,
        };
        let storage_quota_bytes = match lookup("STOREFRONT_STORAGE_QUOTA_BYTES") {
            Some(value) => parse_var("STOREFRONT_STORAGE_QUOTA_BYTES", &value)?,
            None => defaults.storage_quota_bytes,
        };
        let locale = lookup("STOREFRONT_LOCALE")
            .map_or(defaults.locale, |value| Locale::parse_or_default(&value));

        Ok(Self {
            storage,
            state_dir,
            persist_debounce,
            storage_quota_bytes,
            locale,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a numeric environment variable.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
