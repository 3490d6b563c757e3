//! Product identifiers.
//!
//! The backend catalog hands out ids as JSON strings, but older fixtures and
//! hand-written carts sometimes carry bare numbers. Both forms deserialize
//! into the same [`ProductId`] so that `"7"` and `7` refer to one line item.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity key of a catalog product and of the cart line built from it.
///
/// Always serialized as a JSON string.
///
/// ```
/// use infpro_core::ProductId;
///
/// let from_text: ProductId = serde_json::from_str("\"7\"").unwrap();
/// let from_number: ProductId = serde_json::from_str("7").unwrap();
/// assert_eq!(from_text, from_number);
/// assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"7\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawProductId::deserialize(deserializer)? {
            RawProductId::Text(text) => Self(text),
            RawProductId::Number(number) => Self(number.to_string()),
        })
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
