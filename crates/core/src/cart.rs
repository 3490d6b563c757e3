//! Cart line items and the totals derived from them.
//!
//! Everything here is pure. Persistence lives in the storefront crate's
//! cart store, which loads a [`Cart`], applies one of these operations and
//! writes it back.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Subtotals strictly above this amount ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(7000, 0, 0, false, 0);

/// Flat shipping fee charged when the percentage rate comes out lower.
pub const MIN_SHIPPING_FEE: Decimal = Decimal::from_parts(299, 0, 0, false, 1);

/// Shipping rate applied to the subtotal (5%).
pub const SHIPPING_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

const fn default_qty() -> u32 {
    1
}

/// A `null` quantity counts as one unit, same as a missing one.
fn qty_or_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_qty))
}

/// One product in the cart with its requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_qty", deserialize_with = "qty_or_one")]
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartLineItem {
    /// A fresh line for `product` with a quantity of one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            qty: 1,
            description: product.description.clone(),
            img: product.img.clone(),
            extra: product.extra.clone(),
        }
    }

    /// Quantity used for pricing. A zero quantity is billed as one unit.
    #[must_use]
    pub fn billed_qty(&self) -> u32 {
        self.qty.max(1)
    }

    /// `price * qty` for this line, clamped at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.billed_qty()))
    }

    /// `line_total` in the storefront currency.
    #[must_use]
    pub fn line_price(&self) -> Price {
        Price::brl(self.line_total())
    }
}

/// Ordered cart contents, unique by product id.
///
/// Serializes as a bare JSON array of line items. Deserializing a list that
/// repeats an id folds the repeats into the first occurrence, adding up
/// quantities, so a `Cart` never holds two lines for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line only has its quantity bumped; its title, price and
    /// other fields stay as they were when it was first added. Returns the
    /// line's quantity after the change.
    pub fn add_product(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.items.iter_mut().find(|item| item.id == product.id) {
            line.qty = line.qty.saturating_add(1);
            return line.qty;
        }
        self.items.push(CartLineItem::from_product(product));
        1
    }

    /// Drop the line for `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Totals for the current contents.
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals(self)
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
        for item in items {
            match merged.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.qty = line.qty.saturating_add(item.qty),
                None => merged.push(item),
            }
        }
        Self { items: merged }
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Subtotal, shipping and grand total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Shipping fee for a given subtotal.
///
/// Free strictly above [`FREE_SHIPPING_THRESHOLD`]; otherwise the larger of
/// [`MIN_SHIPPING_FEE`] and [`SHIPPING_RATE`] of the subtotal. An empty cart
/// therefore still pays the flat fee.
#[must_use]
pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        MIN_SHIPPING_FEE.max(subtotal * SHIPPING_RATE)
    }
}

/// Compute the [`Totals`] of `cart`.
#[must_use]
pub fn calculate_totals(cart: &Cart) -> Totals {
    let subtotal = cart
        .items
        .iter()
        .map(CartLineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let shipping = shipping_for(subtotal);
    Totals {
        subtotal,
        shipping,
        total: subtotal.saturating_add(shipping),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(id: &str, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_owned(),
            price: dec(price),
            description: None,
            img: None,
            extra: Map::new(),
        }
    }

    fn line(id: &str, price: &str, qty: u32) -> CartLineItem {
        CartLineItem {
            qty,
            ..CartLineItem::from_product(&product(id, id, price))
        }
    }

    #[test]
    fn test_add_new_product_appends_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_product(&product("a", "Cabo HDMI", "39.9")), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].title, "Cabo HDMI");
    }

    #[test]
    fn test_add_same_id_increments_and_keeps_first_fields() {
        let mut cart = Cart::new();
        cart.add_product(&product("a", "Old title", "100"));
        let qty = cart.add_product(&product("a", "New title", "120"));

        assert_eq!(qty, 2);
        assert_eq!(cart.len(), 1);
        let only = cart.get(&ProductId::from("a")).unwrap();
        assert_eq!(only.title, "Old title");
        assert_eq!(only.price, dec("100"));
    }

    #[test]
    fn test_add_remove_sequences_keep_ids_unique() {
        let ids = ["a", "b", "a", "c", "b", "a"];
        let mut cart = Cart::new();
        for (step, id) in ids.iter().enumerate() {
            cart.add_product(&product(id, id, "10"));
            if step % 4 == 3 {
                cart.remove(&ProductId::from("b"));
            }
            let mut seen: Vec<&ProductId> = cart.items().iter().map(|i| &i.id).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), cart.len());
        }
    }

    #[test]
    fn test_remove_existing() {
        let mut cart = Cart::from(vec![line("a", "1", 1), line("b", "2", 1)]);
        assert!(cart.remove(&ProductId::from("a")));
        assert_eq!(cart.items(), &[line("b", "2", 1)]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let original = Cart::from(vec![line("a", "1", 1), line("b", "2", 3)]);
        let mut cart = original.clone();
        assert!(!cart.remove(&ProductId::from("x")));
        assert_eq!(cart, original);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart::from(vec![line("a", "1", 2), line("b", "2", 3)]);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(Cart::new().item_count(), 0);
    }

    #[test]
    fn test_totals_example_cart() {
        let cart = Cart::from(vec![line("a", "100", 2), line("b", "50", 1)]);
        let totals = calculate_totals(&cart);
        assert_eq!(totals.subtotal, dec("250"));
        assert_eq!(totals.shipping, dec("29.9"));
        assert_eq!(totals.total, dec("279.9"));
    }

    #[test]
    fn test_totals_empty_cart_pays_flat_fee() {
        let totals = calculate_totals(&Cart::new());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, dec("29.9"));
        assert_eq!(totals.total, dec("29.9"));
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        assert_eq!(shipping_for(dec("7000.00")), dec("350"));
        assert_eq!(shipping_for(dec("7000.01")), Decimal::ZERO);
    }

    #[test]
    fn test_shipping_percentage_above_flat_fee() {
        // 5% of 1000 = 50 > 29.9
        assert_eq!(shipping_for(dec("1000")), dec("50"));
        // 5% of 598 = 29.9, tie with the flat fee
        assert_eq!(shipping_for(dec("598")), dec("29.9"));
    }

    #[test]
    fn test_totals_is_pure() {
        let cart = Cart::from(vec![line("a", "3333.33", 2), line("b", "0.5", 7)]);
        let first = calculate_totals(&cart);
        let second = calculate_totals(&cart.clone());
        assert_eq!(first, second);
        assert_eq!(first.total, first.subtotal + first.shipping);
    }

    #[test]
    fn test_zero_qty_billed_as_one() {
        let cart = Cart::from(vec![line("a", "10", 0)]);
        assert_eq!(cart.totals().subtotal, dec("10"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let cart = Cart::from(vec![line("a", "100", 2)]);
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            value,
            json!([{"id": "a", "title": "a", "price": 100.0, "qty": 2}])
        );
    }

    #[test]
    fn test_deserialize_carries_unknown_fields() {
        let cart: Cart = serde_json::from_value(json!([
            {"id": "a", "title": "Pen drive", "price": 49.9, "qty": 1, "img": "/p.png", "sku": "PD-64"}
        ]))
        .unwrap();

        let item = &cart.items()[0];
        assert_eq!(item.img.as_deref(), Some("/p.png"));
        assert_eq!(item.extra.get("sku"), Some(&json!("PD-64")));

        let back = serde_json::to_value(&cart).unwrap();
        assert_eq!(back[0]["sku"], json!("PD-64"));
    }

    #[test]
    fn test_deserialize_defaults_missing_qty() {
        let cart: Cart = serde_json::from_value(json!([{"id": "a", "price": 5}])).unwrap();
        assert_eq!(cart.items()[0].qty, 1);
    }

    #[test]
    fn test_deserialize_null_qty_as_one() {
        let cart: Cart = serde_json::from_value(json!([
            {"id": "a", "price": 5, "qty": null},
            {"id": "b", "price": 2, "qty": 3}
        ]))
        .unwrap();
        assert_eq!(cart.items()[0].qty, 1);
        assert_eq!(cart.items()[1].qty, 3);
        assert_eq!(cart.totals().subtotal, dec("11"));
    }

    #[test]
    fn test_totals_clamp_instead_of_overflowing() {
        let cart = Cart::from(vec![
            line("a", "50000000000000000000000000000", 2),
            line("b", "50000000000000000000000000000", 1),
        ]);
        let totals = calculate_totals(&cart);
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn test_deserialize_folds_duplicate_ids() {
        let cart: Cart = serde_json::from_value(json!([
            {"id": "a", "title": "first", "price": 5, "qty": 1},
            {"id": "b", "price": 1, "qty": 1},
            {"id": "a", "title": "second", "price": 9, "qty": 2}
        ]))
        .unwrap();

        assert_eq!(cart.len(), 2);
        let a = cart.get(&ProductId::from("a")).unwrap();
        assert_eq!(a.qty, 3);
        assert_eq!(a.title, "first");
    }
}
