//! Conversion between `MapLibre` interpolate expressions and stop lists.
//!
//! An expression has the flat shape
//! `["interpolate", ["linear"], <input>, v1, s1, v2, s2, ...]`.

use landslide_map_landslide_models::Stop;
use serde_json::Value;

/// Index of the first breakpoint input value.
const FIRST_STOP_INDEX: usize = 3;

/// Extracts the `(threshold, size)` breakpoints from a linear interpolate
/// expression, in declared order.
///
/// Anything that is not an array tagged `"interpolate"` with a `["linear"]`
/// interpolation type yields an empty list. A trailing unpaired element is
/// ignored, as is any pair with a non-numeric member. Thresholds are not
/// checked for monotonicity.
#[must_use]
pub fn interpolate_stops(expr: &Value) -> Vec<Stop> {
    let Some(items) = expr.as_array() else {
        return Vec::new();
    };

    if items.first().and_then(Value::as_str) != Some("interpolate") || !is_linear(items.get(1)) {
        return Vec::new();
    }

    items
        .get(FIRST_STOP_INDEX..)
        .unwrap_or_default()
        .chunks_exact(2)
        .filter_map(|pair| Some(Stop::new(pair[0].as_f64()?, pair[1].as_f64()?)))
        .collect()
}

/// Builds a linear interpolate expression over `input` from `stops`.
#[must_use]
pub fn interpolate_expr(input: Value, stops: &[Stop]) -> Value {
    let mut items = Vec::with_capacity(FIRST_STOP_INDEX + stops.len() * 2);
    items.push(Value::from("interpolate"));
    items.push(serde_json::json!(["linear"]));
    items.push(input);
    for stop in stops {
        items.push(number(stop.threshold));
        items.push(number(stop.size));
    }
    Value::Array(items)
}

/// `["coalesce", ["get", property], 0]`
#[must_use]
pub fn coalesced_property(property: &str) -> Value {
    serde_json::json!(["coalesce", ["get", property], 0])
}

fn is_linear(kind: Option<&Value>) -> bool {
    kind.and_then(Value::as_array)
        .and_then(|k| k.first())
        .and_then(Value::as_str)
        == Some("linear")
}

/// Whole numbers are written as integers so generated style documents
/// match hand-written ones.
#[allow(clippy::cast_possible_truncation)]
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
