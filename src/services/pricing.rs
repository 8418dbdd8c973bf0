use crate::models::{Details, LineItem, Price};

/// Apply each percentage discount in turn, then round to cents.
///
/// Discounts compound: `[10, 20]` takes 10% off, then 20% off what is left.
/// Nothing is clamped or rejected; NaN and infinities propagate.
pub fn compute_price(base_price: f64, discounts: &[f64]) -> Price {
    let discounted = discounts
        .iter()
        .fold(base_price, |price, discount| price * (1.0 - discount / 100.0));

    Price::new(discounted)
}

/// Build the line item for `name`, priced through [`compute_price`].
pub fn add_to_cart(
    name: impl Into<String>,
    price: f64,
    discounts: &[f64],
    details: Details,
) -> LineItem {
    LineItem::new(name.into(), compute_price(price, discounts), details)
}
