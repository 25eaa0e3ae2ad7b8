//! Lenient casts for loosely typed JSON fields.
//!
//! The feeds carry numbers either as JSON numbers or as strings (`"userId": "39"`),
//! and text fields occasionally as numbers. The numeric helpers accept both
//! forms, [`to_string`] widens scalars to text. Anything else casts to `None`.

use serde_json::Value;

/// Cast to text. Strings are kept as is, numbers and booleans are
/// stringified, arrays and objects become `None`.
pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Cast to a float. Accepts numbers and numeric strings.
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Cast to a 64-bit integer, truncating any fractional part.
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_f64)),
        Value::String(s) => parse_integral(s.trim()),
        _ => None,
    }
}

/// Cast to a 32-bit integer, truncating any fractional part.
/// Values out of range fail the cast.
pub fn to_i32(value: &Value) -> Option<i32> {
    to_i64(value).and_then(|v| i32::try_from(v).ok())
}

fn truncate_f64(v: f64) -> Option<i64> {
    if !v.is_finite() {
        return None;
    }
    let truncated = v.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Parses `[+-]digits[.digits]`, dropping the fraction.
fn parse_integral(s: &str) -> Option<i64> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    if let Some(fraction) = fraction {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    let digits = whole.strip_prefix(['+', '-']).unwrap_or(whole);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    whole.parse::<i64>().ok()
}
