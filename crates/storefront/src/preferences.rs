//! Theme preference and auth token persistence.

use infpro_core::Theme;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::storage::{KeyValueStore, StorageError, keys};

/// Per-device settings kept next to the cart.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    storage: S,
}

impl<S: KeyValueStore> Preferences<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Saved theme, or [`Theme::Light`] when nothing usable is stored.
    #[must_use]
    pub fn theme(&self) -> Theme {
        match self.storage.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Theme storage unreadable");
                Theme::default()
            }
        }
    }

    /// Persist `theme`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(keys::THEME, theme.as_str())
    }

    /// Switch to the other theme and return it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn toggle_theme(&self) -> Result<Theme, StorageError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Auth token from the last successful login or registration.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.storage.get(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Token storage unreadable");
                None
            }
        }
    }

    /// Persist `token`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn set_token(&self, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set(keys::TOKEN, token.expose_secret())
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::TOKEN)
    }
}
