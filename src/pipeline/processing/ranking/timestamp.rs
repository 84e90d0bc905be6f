use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{trim_loose, FieldValue};

static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("static regex")
});

static RADIX_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0([xXoObB])([0-9a-zA-Z]+)$").expect("static regex"));

/// Converts text to a number the way loosely-typed sources coerce strings.
///
/// Accepts decimal literals (sign, fraction, exponent), `Infinity` with an optional
/// sign and unsigned `0x`/`0o`/`0b` integers. Blank text coerces to zero.
/// Returns `None` where the coercion would be not-a-number.
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = trim_loose(text);

    if text.is_empty() {
        return Some(0.0);
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(caps) = RADIX_LITERAL.captures(text) {
        let radix = match &caps[1] {
            "x" | "X" => 16,
            "o" | "O" => 8,
            _ => 2,
        };
        return caps[2].chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
        });
    }

    if DECIMAL_LITERAL.is_match(text) {
        return text.parse::<f64>().ok();
    }

    None
}

/// Numeric value of a usable timestamp.
///
/// Only text qualifies; a raw number is rejected. Blank text is rejected before
/// coercion (it would otherwise read as zero), as are not-a-number and negative values.
pub fn timestamp_value(value: Option<&FieldValue>) -> Option<f64> {
    let text = value?.as_text()?;
    if trim_loose(text).is_empty() {
        return None;
    }
    coerce_number(text).filter(|number| *number >= 0.0)
}

pub fn is_valid_timestamp(value: Option<&FieldValue>) -> bool {
    timestamp_value(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(value: &str) -> Option<FieldValue> {
        Some(FieldValue::text(value))
    }

    #[test]
    fn test_accepts_non_negative_numeric_text() {
        assert!(is_valid_timestamp(text("1234.5").as_ref()));
        assert!(is_valid_timestamp(text("0").as_ref()));
        assert!(is_valid_timestamp(text("  42 ").as_ref()));
        assert!(is_valid_timestamp(text("99999999999999").as_ref()));
        assert!(is_valid_timestamp(text("1e3").as_ref()));
    }

    #[test]
    fn test_rejects_negative_and_non_numeric_text() {
        assert!(!is_valid_timestamp(text("-5").as_ref()));
        assert!(!is_valid_timestamp(text("-12345").as_ref()));
        assert!(!is_valid_timestamp(text("qwerty").as_ref()));
        assert!(!is_valid_timestamp(text("12abc").as_ref()));
        assert!(!is_valid_timestamp(text("NaN").as_ref()));
        assert!(!is_valid_timestamp(text("-Infinity").as_ref()));
    }

    #[test]
    fn test_rejects_blank_text() {
        assert!(!is_valid_timestamp(text("").as_ref()));
        assert!(!is_valid_timestamp(text("   ").as_ref()));
    }

    #[test]
    fn test_rejects_non_text_values() {
        assert!(!is_valid_timestamp(Some(&FieldValue::from(555i64))));
        assert!(!is_valid_timestamp(Some(&FieldValue::Other(json!({"value": 555})))));
        assert!(!is_valid_timestamp(None));
    }

    #[test]
    fn test_coerce_number_follows_loose_string_rules() {
        assert_eq!(coerce_number("  12 "), Some(12.0));
        assert_eq!(coerce_number(""), Some(0.0));
        assert_eq!(coerce_number(".5"), Some(0.5));
        assert_eq!(coerce_number("5."), Some(5.0));
        assert_eq!(coerce_number("+7"), Some(7.0));
        assert_eq!(coerce_number("0x1F"), Some(31.0));
        assert_eq!(coerce_number("0b101"), Some(5.0));
        assert_eq!(coerce_number("0o17"), Some(15.0));
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("0x1G"), None);
        assert_eq!(coerce_number("-0x10"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("1_000"), None);
        assert_eq!(coerce_number("1 2"), None);
    }

    #[test]
    fn test_trims_only_loose_whitespace() {
        assert!(is_valid_timestamp(text("\u{feff}\u{a0}5\u{2029}").as_ref()));
        assert!(!is_valid_timestamp(text("\u{85}5").as_ref()));
        assert!(!is_valid_timestamp(text("\u{85}").as_ref()));
        assert_eq!(coerce_number("5\u{85}"), None);
    }
}
