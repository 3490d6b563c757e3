//! Cache types for backend API responses.

use infpro_core::{Product, Review};

/// Cache key, one per cached endpoint.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Reviews,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Reviews(Vec<Review>),
}
