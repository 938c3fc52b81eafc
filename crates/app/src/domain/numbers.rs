//! Loosely typed form values and their safe numeric coercions.
//!
//! Cart lines arrive from browser forms where quantities, prices and product
//! ids may be numbers, numeric strings, decorated strings (`"1'234.56 CHF"`) or
//! missing entirely. These helpers never fail: anything unusable degrades to
//! `0` or `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON value of unknown shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    #[default]
    Missing,
    Integer(i64),
    Number(f64),
    Text(String),
    Flag(bool),
    Other(Value),
}

impl LooseValue {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<i64> for LooseValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LooseValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LooseValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T> From<Option<T>> for LooseValue
where
    T: Into<LooseValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl From<Value> for LooseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Bool(flag) => Self::Flag(flag),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Number))
                .unwrap_or(Self::Other(Value::Number(number))),
            Value::String(text) => Self::Text(text),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Other(other),
        }
    }
}

/// Coerce a loose value into a finite number, defaulting to `0.0`.
#[must_use]
pub fn safe_number(value: &LooseValue) -> f64 {
    let number = match value {
        #[expect(
            clippy::cast_precision_loss,
            reason = "form quantities and prices are far below 2^52"
        )]
        LooseValue::Integer(integer) => *integer as f64,
        LooseValue::Number(number) => *number,
        LooseValue::Text(text) => parse_decorated_number(text).unwrap_or(0.0),
        LooseValue::Missing | LooseValue::Flag(_) | LooseValue::Other(_) => 0.0,
    };

    if number.is_finite() { number } else { 0.0 }
}

/// Coerce a loose value into a whole quantity, rounding fractional input.
#[must_use]
pub fn safe_quantity(value: &LooseValue) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "safe_number is finite; saturating cast is the intended clamp"
    )]
    let quantity = safe_number(value).round() as i64;

    quantity
}

/// Coerce a product identifier into a catalog reference.
///
/// Only integers and all-digit strings are references. Synthetic identifiers
/// such as `cost_1699999999`, and any other non-numeric key, become `None`.
#[must_use]
pub fn product_ref_or_null(value: &LooseValue) -> Option<i64> {
    match value {
        LooseValue::Integer(integer) => Some(*integer),
        #[expect(
            clippy::cast_possible_truncation,
            reason = "only whole finite numbers reach the cast"
        )]
        LooseValue::Number(number) if number.is_finite() && number.fract() == 0.0 => {
            Some(*number as i64)
        }
        LooseValue::Text(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.parse().ok()
        }
        LooseValue::Number(_)
        | LooseValue::Text(_)
        | LooseValue::Missing
        | LooseValue::Flag(_)
        | LooseValue::Other(_) => None,
    }
}

/// Strip everything but digits, `,`, `.` and `-`, treat the first comma as a
/// decimal separator, then read the longest numeric prefix.
fn parse_decorated_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let cleaned = cleaned.replacen(',', ".", 1);

    parse_number_prefix(&cleaned)
}

fn parse_number_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let is_digit = |index: usize| bytes.get(index).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let integer_start = end;

    while is_digit(end) {
        end += 1;
    }

    let mut has_digits = end > integer_start;

    if bytes.get(end) == Some(&b'.') {
        let mut fraction_end = end + 1;

        while is_digit(fraction_end) {
            fraction_end += 1;
        }

        if fraction_end > end + 1 {
            has_digits = true;
            end = fraction_end;
        }
    }

    if !has_digits {
        return None;
    }

    text.get(..end)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn loose(value: Value) -> LooseValue {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn converts_from_json_values() {
        assert_eq!(LooseValue::from(json!(null)), LooseValue::Missing);
        assert_eq!(LooseValue::from(json!(3)), LooseValue::Integer(3));
        assert_eq!(LooseValue::from(json!(2.5)), LooseValue::Number(2.5));
        assert_eq!(LooseValue::from(json!("x")), LooseValue::Text("x".to_string()));
        assert_eq!(LooseValue::from(json!([1])), LooseValue::Other(json!([1])));
    }

    #[test]
    fn decorated_currency_string_is_cleaned() {
        assert!((safe_number(&"1'234.56 CHF".into()) - 1234.56).abs() < f64::EPSILON);
    }

    #[test]
    fn first_comma_is_a_decimal_separator() {
        assert!((safe_number(&"12,5".into()) - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unusable_values_become_zero() {
        assert!(safe_number(&LooseValue::Missing).abs() < f64::EPSILON);
        assert!(safe_number(&"".into()).abs() < f64::EPSILON);
        assert!(safe_number(&"CHF".into()).abs() < f64::EPSILON);
        assert!(safe_number(&f64::NAN.into()).abs() < f64::EPSILON);
        assert!(safe_number(&f64::INFINITY.into()).abs() < f64::EPSILON);
        assert!(safe_number(&LooseValue::Flag(true)).abs() < f64::EPSILON);
        assert!(safe_number(&loose(json!({ "amount": 3 }))).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_and_fractional_prefixes_parse() {
        assert!((safe_number(&"-7.25".into()) + 7.25).abs() < f64::EPSILON);
        assert!((safe_number(&".5".into()) - 0.5).abs() < f64::EPSILON);
        assert!((safe_number(&"3-4".into()) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quantities_are_rounded() {
        assert_eq!(safe_quantity(&"2.6".into()), 3);
        assert_eq!(safe_quantity(&4_i64.into()), 4);
        assert_eq!(safe_quantity(&LooseValue::Missing), 0);
    }

    #[test]
    fn numeric_product_ids_are_references() {
        assert_eq!(product_ref_or_null(&"42".into()), Some(42));
        assert_eq!(product_ref_or_null(&42_i64.into()), Some(42));
        assert_eq!(product_ref_or_null(&42.0_f64.into()), Some(42));
    }

    #[test]
    fn synthetic_product_ids_are_dropped() {
        assert_eq!(product_ref_or_null(&"cost_1699999999".into()), None);
        assert_eq!(
            product_ref_or_null(&"0190b6a2-7c1e-7d34-9a4f-5f1f2d3c4b5a".into()),
            None
        );
        assert_eq!(product_ref_or_null(&"".into()), None);
        assert_eq!(product_ref_or_null(&4.5_f64.into()), None);
        assert_eq!(product_ref_or_null(&LooseValue::Missing), None);
    }

    #[test]
    fn deserializes_any_json_shape() {
        assert_eq!(loose(json!(null)), LooseValue::Missing);
        assert_eq!(loose(json!(7)), LooseValue::Integer(7));
        assert_eq!(loose(json!(7.5)), LooseValue::Number(7.5));
        assert_eq!(loose(json!("7")), LooseValue::Text("7".to_string()));
        assert_eq!(loose(json!(false)), LooseValue::Flag(false));
    }
}
