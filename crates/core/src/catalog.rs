//! Records served by the backend catalog and review endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Price, ProductId};

/// A product as listed by `GET /api/products`.
///
/// Fields the storefront does not interpret are kept in `extra` so they
/// survive being copied into the cart and written back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Unit price in the storefront currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::brl(self.price)
    }
}

/// A customer review as listed by `GET /api/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
}
