use serde::Serialize;

use crate::models::{Cart, Details, LineItem, Price};

pub const SUMMARY_HEADER: &str = "--- Cart Summary ---";

#[derive(Debug, Serialize)]
pub struct CartSummary<'a> {
    pub items: &'a [LineItem],
    pub total: Price,
}

impl<'a> From<&'a Cart> for CartSummary<'a> {
    fn from(cart: &'a Cart) -> Self {
        Self {
            items: cart.items(),
            total: cart.total(),
        }
    }
}

pub fn format_item_added(item: &LineItem) -> String {
    format!(
        "Item added: {} - Final Price: ${}",
        item.name(),
        item.final_price()
    )
}

pub fn format_duplicate(name: &str) -> String {
    format!("{} is already in the cart. Skipping...", name)
}

/// `k1=v1, k2=v2` in insertion order.
pub fn format_details(details: &Details) -> String {
    details
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_summary_line(item: &LineItem) -> String {
    format!(
        "{} - ${} ({})",
        item.name(),
        item.final_price(),
        format_details(item.details())
    )
}

pub fn format_total(total: Price) -> String {
    format!("Total Cost: ${}", total)
}

/// Blank line, header, one line per item, total.
pub fn format_summary(cart: &Cart) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(SUMMARY_HEADER);
    output.push('\n');

    for item in cart.items() {
        output.push_str(&format_summary_line(item));
        output.push('\n');
    }

    output.push_str(&format_total(cart.total()));
    output.push('\n');
    output
}

pub fn format_summary_json(cart: &Cart) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CartSummary::from(cart))
}
