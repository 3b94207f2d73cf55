//! Decimal amount helpers.
//!
//! The storefront sends prices as JSON strings or numbers interchangeably and
//! expects amounts back as two-decimal strings.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render an amount with exactly two decimals (`"12.50"`).
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Parse a decimal from user text, accepting plain and scientific notation.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse a decimal from a JSON value that may be a string or a number.
pub fn amount_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_amount(s),
        Value::Number(n) => parse_amount(&n.to_string()),
        _ => None,
    }
}

/// Deserialize an optional field that the browser may send as a string,
/// a number or a boolean, keeping its textual form.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn parses_strings_and_numbers() {
        assert_eq!(amount_from_value(&json!("10.50")), Some(Decimal::new(1050, 2)));
        assert_eq!(amount_from_value(&json!(3)), Some(Decimal::new(3, 0)));
        assert_eq!(amount_from_value(&json!(2.5)), Some(Decimal::new(25, 1)));
        assert_eq!(amount_from_value(&json!("abc")), None);
        assert_eq!(amount_from_value(&json!(null)), None);
    }
}
