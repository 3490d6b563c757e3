//! Persistent shopping cart.
//!
//! [`CartStore`] is the only code that reads or writes the cart key. Every
//! mutation is a complete load-modify-save cycle, so there is never a
//! half-applied cart in storage.
//!
//! Unreadable cart data (absent key, storage read failure, bad JSON) loads
//! as an empty cart. The shopper loses a broken cart rather than being
//! locked out of the store by it.

use infpro_core::{Cart, Product, ProductId, Totals, calculate_totals};
use tracing::{debug, instrument, warn};

use crate::notify::{LogNotifier, Notifier};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Toast shown after a product is added.
pub const ADDED_TO_CART: &str = "Added to cart";

/// Cart persisted in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartStore<S, N = LogNotifier> {
    storage: S,
    notifier: N,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Store whose notifications only go to the log.
    #[must_use]
    pub const fn with_storage(storage: S) -> Self {
        Self::new(storage, LogNotifier)
    }
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Store over `storage`, reporting additions through `notifier`.
    #[must_use]
    pub const fn new(storage: S, notifier: N) -> Self {
        Self { storage, notifier }
    }

    /// Read the persisted cart. Never fails; see the module docs.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(keys::CART) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable, using empty cart");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Persisted cart is malformed, using empty cart");
            Cart::new()
        })
    }

    /// Overwrite the persisted cart with `cart`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend rejects the write.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(keys::CART, &raw)
    }

    /// Add one unit of `product` and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be saved. Nothing
    /// is announced in that case.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: &Product) -> Result<Cart, StorageError> {
        let mut cart = self.load();
        let qty = cart.add_product(product);
        self.save(&cart)?;
        debug!(qty, lines = cart.len(), "Product added to cart");
        self.notifier.toast(ADDED_TO_CART);
        Ok(cart)
    }

    /// Remove the line for `id` and return the updated cart.
    ///
    /// Removing a product that is not in the cart leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn remove(&self, id: &ProductId) -> Result<Cart, StorageError> {
        let mut cart = self.load();
        let removed = cart.remove(id);
        self.save(&cart)?;
        debug!(removed, lines = cart.len(), "Cart line removed");
        Ok(cart)
    }

    /// Totals of the persisted cart.
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals(&self.load())
    }

    /// Units in the persisted cart (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.load().item_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::{Map, json};

    use super::*;
    use crate::notify::{Notification, RecordingNotifier};
    use crate::storage::MemoryStore;

    fn product(id: &str, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_owned(),
            price: Decimal::from_str(price).unwrap(),
            description: None,
            img: Some(format!("/img/{id}.png")),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_load_empty_storage() {
        let store = CartStore::with_storage(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let storage = MemoryStore::new();
        storage.set(keys::CART, "[{\"id\": ").unwrap();
        let store = CartStore::with_storage(&storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let storage = MemoryStore::new();
        storage.set(keys::CART, "{\"id\": \"a\"}").unwrap();
        assert!(CartStore::with_storage(&storage).load().is_empty());
    }

    #[test]
    fn test_load_keeps_lines_with_null_qty() {
        let storage = MemoryStore::new();
        storage
            .set(keys::CART, r#"[{"id":"a","title":"Cabo","price":10,"qty":null}]"#)
            .unwrap();
        let store = CartStore::with_storage(&storage);
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.totals().subtotal, Decimal::from(10));
    }

    #[test]
    fn test_load_after_clear_is_empty() {
        let storage = MemoryStore::new();
        let store = CartStore::with_storage(&storage);
        store.add(&product("a", "Monitor", "899")).unwrap();
        storage.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_persists_and_toasts() {
        let storage = MemoryStore::new();
        let notifier = RecordingNotifier::new();
        let store = CartStore::new(&storage, &notifier);

        let cart = store.add(&product("a", "Monitor", "899")).unwrap();
        assert_eq!(cart.len(), 1);

        let raw = storage.get(keys::CART).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            stored,
            json!([{
                "id": "a",
                "title": "Monitor",
                "price": 899.0,
                "qty": 1,
                "img": "/img/a.png"
            }])
        );
        assert_eq!(
            notifier.notifications(),
            vec![Notification::Toast(ADDED_TO_CART.to_owned())]
        );
    }

    #[test]
    fn test_add_twice_keeps_first_fields() {
        let store = CartStore::with_storage(MemoryStore::new());
        store.add(&product("a", "Monitor", "899")).unwrap();
        store.add(&product("a", "Monitor (promo)", "799")).unwrap();

        let cart = store.load();
        assert_eq!(cart.len(), 1);
        let line = cart.get(&ProductId::from("a")).unwrap();
        assert_eq!(line.qty, 2);
        assert_eq!(line.title, "Monitor");
        assert_eq!(line.price, Decimal::from(899));
    }

    #[test]
    fn test_remove_existing_and_missing() {
        let store = CartStore::with_storage(MemoryStore::new());
        store.add(&product("a", "A", "1")).unwrap();
        store.add(&product("b", "B", "2")).unwrap();
        store.add(&product("c", "C", "3")).unwrap();

        let before = store.load();
        let after = store.remove(&ProductId::from("x")).unwrap();
        assert_eq!(before, after);

        let after = store.remove(&ProductId::from("b")).unwrap();
        let ids: Vec<&str> = after.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(store.load(), after);
    }

    #[test]
    fn test_totals_and_count_from_storage() {
        let store = CartStore::with_storage(MemoryStore::new());
        store.add(&product("a", "A", "100")).unwrap();
        store.add(&product("a", "A", "100")).unwrap();
        store.add(&product("b", "B", "50")).unwrap();

        let totals = store.totals();
        assert_eq!(totals.subtotal, Decimal::from(250));
        assert_eq!(totals.shipping, Decimal::from_str("29.9").unwrap());
        assert_eq!(totals.total, Decimal::from_str("279.9").unwrap());
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_add_on_corrupt_cart_starts_fresh() {
        let storage = MemoryStore::new();
        storage.set(keys::CART, "garbage").unwrap();
        let store = CartStore::with_storage(&storage);

        let cart = store.add(&product("a", "A", "10")).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(store.load(), cart);
    }
}
