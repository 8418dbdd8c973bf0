use thiserror::Error;

use crate::models::line_item::Details;

/// Word typed at the item-name prompt to stop collecting items.
pub const SENTINEL: &str = "done";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid price. Please enter a numeric value.")]
    InvalidPrice,

    #[error("Invalid discount '{token}'. Please enter numeric values.")]
    MalformedDiscount { token: String },

    #[error("Invalid detail '{token}'. Please use key=value.")]
    MalformedDetail { token: String },
}

pub fn is_sentinel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Parse a decimal number the way `f64` does, also allowing `_` as a digit
/// separator when it sits between two digits (`1_000`, `2_500.5`).
fn parse_number(token: &str) -> Option<f64> {
    if !token.contains('_') {
        return token.parse().ok();
    }

    let bytes = token.as_bytes();
    let grouped = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !grouped {
        return None;
    }

    token.replace('_', "").parse().ok()
}

/// Accepts anything `f64` parses after trimming, including `inf` and `nan`.
pub fn parse_price(input: &str) -> Result<f64, InputError> {
    parse_number(input.trim()).ok_or(InputError::InvalidPrice)
}

/// Whitespace separated percentages, kept in the order given.
pub fn parse_discounts(input: &str) -> Result<Vec<f64>, InputError> {
    input
        .split_whitespace()
        .map(|token| {
            parse_number(token).ok_or_else(|| InputError::MalformedDiscount {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Whitespace separated `key=value` tokens, each split on its first `=`.
pub fn parse_details(input: &str) -> Result<Details, InputError> {
    let mut details = Details::new();

    for token in input.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| InputError::MalformedDetail {
                token: token.to_string(),
            })?;
        details.insert(key, value);
    }

    Ok(details)
}
