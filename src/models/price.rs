use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;

/// Number of decimal places every stored price is rounded to.
pub const CENT_PLACES: u32 = 2;

/// A monetary amount rounded to cents.
///
/// The amount is kept as an `f64` so that NaN and infinities flow through
/// pricing untouched. Rounding goes through `rust_decimal` on the exact
/// binary value, half-to-even, so `0.125` becomes `0.12` and `2.675`
/// (stored as `2.67499..`) becomes `2.67`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(f64);

impl Price {
    /// Round `amount` to cents and wrap it.
    pub fn new(amount: f64) -> Self {
        Self(round_to_cents(amount))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

pub fn round_to_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }

    // Out of Decimal range means |amount| > 7.9e28, which has no fractional part anyway.
    let Some(exact) = Decimal::from_f64_retain(amount) else {
        return amount;
    };

    let rounded = exact
        .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .unwrap_or(amount);

    // Decimal has no negative zero; -0.001 must still come back as -0.0.
    if rounded == 0.0 {
        return rounded.copysign(amount);
    }
    rounded
}

/// Sums raw amounts in order, then rounds the result once.
impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        Price::new(iter.fold(0.0, |acc, price| acc + price.0))
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Shortest round-trip form: `9.0`, `12.35`, `1e+16`, `inf`, `nan`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }

        let repr = format!("{:?}", value);
        match repr.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => f.write_str(&repr),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_to_even_on_exact_value() {
        assert_eq!(Price::new(0.125).amount(), 0.12);
        assert_eq!(Price::new(0.375).amount(), 0.38);
        // 2.675 is really 2.67499999...
        assert_eq!(Price::new(2.675).amount(), 2.67);
        assert_eq!(Price::new(19.999).amount(), 20.0);
    }

    #[test]
    fn test_non_finite_values_pass_through() {
        assert!(Price::new(f64::NAN).amount().is_nan());
        assert_eq!(Price::new(f64::INFINITY).amount(), f64::INFINITY);
        assert_eq!(Price::new(f64::NEG_INFINITY).amount(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_display_matches_short_float_form() {
        assert_eq!(Price::new(9.0).to_string(), "9.0");
        assert_eq!(Price::new(12.35).to_string(), "12.35");
        assert_eq!(Price::new(12.3).to_string(), "12.3");
        assert_eq!(Price::new(-4.5).to_string(), "-4.5");
        assert_eq!(Price::zero().to_string(), "0.0");
        assert_eq!(Price::new(-0.0).to_string(), "-0.0");
        assert_eq!(Price::new(1e16).to_string(), "1e+16");
        assert_eq!(Price::new(f64::NAN).to_string(), "nan");
        assert_eq!(Price::new(f64::INFINITY).to_string(), "inf");
        assert_eq!(Price::new(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_tiny_negative_rounds_to_negative_zero() {
        let price = Price::new(-0.001);
        assert_eq!(price.amount(), 0.0);
        assert!(price.amount().is_sign_negative());
        assert_eq!(price.to_string(), "-0.0");

        assert!(Price::new(0.001).amount().is_sign_positive());
        assert_eq!(Price::new(0.001).to_string(), "0.0");
    }

    #[test]
    fn test_sum_rounds_once_at_the_end() {
        let prices = [Price::new(0.1), Price::new(0.2)];
        let total: Price = prices.iter().sum();
        assert_eq!(total.amount(), 0.3);

        let empty: Vec<Price> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Price>(), Price::zero());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Price::new(9.5)).unwrap();
        assert_eq!(json, "9.5");
    }
}
