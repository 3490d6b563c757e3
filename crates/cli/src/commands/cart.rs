//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! infpro cart list
//! infpro cart add kb-01
//! infpro cart remove kb-01
//! infpro cart count
//! ```

use infpro_core::ProductId;
use infpro_storefront::StorefrontError;

use super::Context;
use crate::console;

/// Print cart lines and totals.
pub fn list(ctx: &Context) {
    console::print_lines(&console::cart_view(&ctx.cart().load()));
}

/// Look `id` up in the catalog and add one unit of it.
///
/// # Errors
///
/// Returns `NotFound` if the catalog has no such product (including when the
/// catalog could not be fetched), or a storage error if the cart cannot be saved.
pub async fn add(ctx: &Context, id: &str) -> infpro_storefront::Result<()> {
    let id = ProductId::from(id);
    let products = ctx.api.products().await;
    let product = products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

    let cart = ctx.cart().add(product)?;
    console::print_lines(&[console::cart_badge(cart.item_count())]);
    Ok(())
}

/// Remove the line for `id`. Unknown ids are ignored.
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
pub fn remove(ctx: &Context, id: &str) -> infpro_storefront::Result<()> {
    let cart = ctx.cart().remove(&ProductId::from(id))?;
    console::print_lines(&console::cart_view(&cart));
    Ok(())
}

/// Print the cart badge.
pub fn count(ctx: &Context) {
    console::print_lines(&[console::cart_badge(ctx.cart().item_count())]);
}
