//! Catalog and review listings.

use super::Context;
use crate::console;

/// Print the product catalog. A backend failure prints an empty catalog.
pub async fn products(ctx: &Context) {
    let products = ctx.api.products().await;
    if products.is_empty() {
        console::print_lines(&["No products available".to_string()]);
        return;
    }
    let lines: Vec<String> = products.iter().map(console::product_line).collect();
    console::print_lines(&lines);
}

/// Print customer reviews.
pub async fn reviews(ctx: &Context) {
    let lines: Vec<String> = ctx
        .api
        .reviews()
        .await
        .iter()
        .map(console::review_line)
        .collect();
    console::print_lines(&lines);
}
