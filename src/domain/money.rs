use std::str::FromStr;

use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, Zero};

/// Prices and sales values are exact decimals, never binary floats.
pub type Price = BigDecimal;

/// Exact decimal sum of a sequence of values.
pub fn sum_decimals<'a, I>(values: I) -> Price
where
    I: IntoIterator<Item = &'a Price>,
{
    values
        .into_iter()
        .fold(Price::zero(), |acc, value| acc + value)
}

/// Render a decimal in plain positional notation with trailing fractional
/// zeros removed.
/// Example: 20.1010 -> "20.101", 2.0 -> "2", 100 -> "100"
pub fn format_decimal(value: &Price) -> String {
    let (digits, scale) = value.normalized().as_bigint_and_exponent();
    let sign = if digits.sign() == Sign::Minus { "-" } else { "" };
    let magnitude = digits.magnitude().to_string();

    if scale <= 0 {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        if magnitude == "0" {
            return magnitude;
        }
        return format!("{}{}{}", sign, magnitude, zeros);
    }

    let scale = scale as usize;
    if magnitude.len() > scale {
        let (units, fraction) = magnitude.split_at(magnitude.len() - scale);
        format!("{}{}.{}", sign, units, fraction)
    } else {
        let padding = "0".repeat(scale - magnitude.len());
        format!("{}0.{}{}", sign, padding, magnitude)
    }
}

/// Parse a non-negative decimal price.
/// Example: "2.50" -> 2.50, "3" -> 3, "-1" -> error
pub fn parse_price(input: &str) -> Result<Price, ParsePriceError> {
    let price = Price::from_str(input.trim()).map_err(|_| ParsePriceError::InvalidFormat)?;
    if price.sign() == Sign::Minus {
        return Err(ParsePriceError::Negative);
    }
    Ok(price)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePriceError {
    #[error("invalid price format")]
    InvalidFormat,
    #[error("price cannot be negative")]
    Negative,
}
