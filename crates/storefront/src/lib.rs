//! Infpro Storefront - client-side storefront library.
//!
//! Keeps the shopping cart, theme and session token in persistent
//! key-value storage and talks to the storefront backend for the catalog,
//! reviews and account forms.
//!
//! # Architecture
//!
//! - [`storage`] - Injected key-value handle (`FileStore`, `MemoryStore`)
//! - [`cart`] - The cart store: load, save, add, remove, totals
//! - [`preferences`] - Theme and auth token
//! - [`api`] - `reqwest` client for `/api/*` with a `moka` response cache
//! - [`forms`] - Login, register, contact and quote flows
//! - [`notify`] - Toast/alert surface implemented by the front end

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod forms;
pub mod notify;
pub mod preferences;
pub mod storage;

pub use api::{ApiError, AuthResponse, StorefrontApi};
pub use cart::CartStore;
pub use config::{ApiConfig, ConfigError, StorefrontConfig};
pub use error::{Result, StorefrontError};
pub use forms::{FormOutcome, FormSubmitter};
pub use notify::{LogNotifier, Notifier};
pub use preferences::Preferences;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
