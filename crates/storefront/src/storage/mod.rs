//! Persistent key-value storage.
//!
//! The storefront keeps three values across runs: the cart, the theme and
//! the auth token. They all go through a [`KeyValueStore`] handle that is
//! injected into the stores that own each key, so tests can swap in a
//! [`MemoryStore`] and the CLI can use a [`FileStore`].
//!
//! Raw keys are only referenced by the owning stores:
//! - [`keys::CART`] by [`crate::cart::CartStore`]
//! - [`keys::THEME`] and [`keys::TOKEN`] by [`crate::preferences::Preferences`]

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Serialized cart (JSON array of line items).
    pub const CART: &str = "infpro_cart_v2";
    /// `"light"` or `"dark"`.
    pub const THEME: &str = "infpro_theme";
    /// Opaque auth token returned by login/register.
    pub const TOKEN: &str = "infpro_token";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not valid JSON of the expected shape.
    #[error("invalid storage data: {0}")]
    Json(#[from] serde_json::Error),

    /// The in-process lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-to-string store that survives restarts.
///
/// Methods take `&self`; implementations use interior locking so a single
/// handle can be shared between the cart store and preferences.
pub trait KeyValueStore: Send + Sync {
    /// Read `key`, `None` if it was never written or has been removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
