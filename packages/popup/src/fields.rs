//! Lenient accessors for schema-less feature properties.

use landslide_map_landslide_models::MISSING;
use serde_json::Value;

/// Reads a value as a number.
///
/// Absent values are `None`, not zero. Numeric strings are parsed;
/// anything else that is not a finite number is `None`.
#[must_use]
pub fn num(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Reads a value as display text, falling back to [`MISSING`].
#[must_use]
pub fn safe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Formats a count as a grouped integer when it is numeric, passes other
/// text through, and falls back to [`MISSING`].
#[must_use]
pub fn count(value: Option<&Value>) -> String {
    num(value).map_or_else(|| safe(value), landslide_map_legend::format::grouped)
}

/// Formats a dollar amount, falling back to [`MISSING`] for absent or
/// non-numeric input.
#[must_use]
pub fn dollars(value: Option<&Value>) -> String {
    num(value).map_or_else(|| MISSING.to_string(), landslide_map_legend::format::currency)
}
