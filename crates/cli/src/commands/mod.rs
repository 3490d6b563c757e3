//! Command implementations.
//!
//! Every command works against the same [`Context`]: one file-backed store
//! shared by the cart and preferences, and one backend client.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod theme;

use std::sync::Arc;

use infpro_storefront::{
    CartStore, FileStore, FormSubmitter, Preferences, StorefrontApi, StorefrontConfig,
};

use crate::console::ConsoleNotifier;

type Storage = Arc<FileStore>;

/// Handles shared by all commands.
pub struct Context {
    storage: Storage,
    api: StorefrontApi,
}

impl Context {
    /// Build the context from `INFPRO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid or the HTTP client fails to build.
    pub fn from_env() -> infpro_storefront::Result<Self> {
        let config = StorefrontConfig::from_env()?;
        tracing::debug!(
            api = %config.api.base_url,
            storage = %config.storage_path.display(),
            "Configuration loaded"
        );
        Ok(Self {
            storage: Arc::new(FileStore::new(&config.storage_path)),
            api: StorefrontApi::new(&config.api)?,
        })
    }

    fn cart(&self) -> CartStore<Storage, ConsoleNotifier> {
        CartStore::new(Arc::clone(&self.storage), ConsoleNotifier)
    }

    fn preferences(&self) -> Preferences<Storage> {
        Preferences::new(Arc::clone(&self.storage))
    }

    fn forms(&self) -> FormSubmitter<Storage, ConsoleNotifier> {
        FormSubmitter::new(self.api.clone(), self.preferences(), ConsoleNotifier)
    }
}
