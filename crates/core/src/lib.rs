//! Infpro Core - Shared domain types for the storefront client.
//!
//! This crate provides the types used by the other Infpro components:
//! - `storefront` - Cart store, preferences and backend API client
//! - `cli` - The `infpro` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no storage, no
//! HTTP. Cart arithmetic lives here so it can be tested without any I/O.
//!
//! # Modules
//!
//! - [`cart`] - Cart line items, merge/remove rules and totals
//! - [`catalog`] - Product and review records from the backend
//! - [`types`] - Newtype wrappers for ids, prices, emails and the theme

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLineItem, Totals, calculate_totals, shipping_for};
pub use catalog::{Product, Review};
pub use types::*;
