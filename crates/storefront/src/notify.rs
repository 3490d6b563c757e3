//! User-facing notifications.
//!
//! The storefront raises two kinds: a transient toast ("Added to cart") and
//! a blocking alert for form outcomes. How they are shown belongs to the
//! front end, so stores and flows only see the [`Notifier`] trait.

use std::sync::Mutex;

/// Surface for messages meant for the shopper.
pub trait Notifier: Send + Sync {
    /// Show a short-lived, non-blocking message.
    fn toast(&self, message: &str);

    /// Show a message the shopper has to acknowledge.
    fn alert(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn toast(&self, message: &str) {
        (**self).toast(message);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn toast(&self, message: &str) {
        (**self).toast(message);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

/// Notifier that only emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn toast(&self, message: &str) {
        tracing::info!(kind = "toast", "{message}");
    }

    fn alert(&self, message: &str) {
        tracing::info!(kind = "alert", "{message}");
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Toast(String),
    Alert(String),
}

/// Notifier that keeps every message, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str) {
        self.push(Notification::Toast(message.to_owned()));
    }

    fn alert(&self, message: &str) {
        self.push(Notification::Alert(message.to_owned()));
    }
}
