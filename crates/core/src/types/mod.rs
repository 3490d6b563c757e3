//! Newtype wrappers for storefront domain values.

pub mod email;
pub mod id;
pub mod price;
pub mod theme;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use theme::{Theme, ThemeParseError};
