//! Terminal output: the console notifier and plain-text line formatting.

#![allow(clippy::print_stdout)]

use infpro_core::{Cart, CartLineItem, Price, Product, Review, Totals};
use infpro_storefront::Notifier;

/// Prints notifications to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn toast(&self, message: &str) {
        println!("{message}");
    }

    fn alert(&self, message: &str) {
        println!("! {message}");
    }
}

/// Print each line to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// `title xqty  R$ line_total  [id]`
pub fn cart_line(item: &CartLineItem) -> String {
    format!(
        "{} x{}  {}  [{}]",
        item.title,
        item.qty,
        item.line_price(),
        item.id
    )
}

pub fn totals_lines(totals: &Totals) -> Vec<String> {
    vec![
        format!("Subtotal: {}", Price::brl(totals.subtotal)),
        format!("Shipping: {}", Price::brl(totals.shipping)),
        format!("Total:    {}", Price::brl(totals.total)),
    ]
}

/// Cart lines followed by the totals block.
pub fn cart_view(cart: &Cart) -> Vec<String> {
    let mut lines: Vec<String> = if cart.is_empty() {
        vec!["Your cart is empty".to_string()]
    } else {
        cart.items().iter().map(cart_line).collect()
    };
    lines.push(String::new());
    lines.extend(totals_lines(&cart.totals()));
    lines
}

pub fn product_line(product: &Product) -> String {
    let mut line = format!("[{}] {}  {}", product.id, product.title, product.unit_price());
    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(description);
    }
    line
}

pub fn review_line(review: &Review) -> String {
    format!("{} ★ {}  {}", review.name, review.rating, review.text)
}

/// Floating cart badge text.
pub fn cart_badge(count: u64) -> String {
    format!("🛒 ({count})")
}
