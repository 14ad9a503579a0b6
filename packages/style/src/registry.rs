//! Compile-time registry of metric layer definitions.
//!
//! Each metric is defined in a TOML file under `layers/`. The registry
//! embeds these at compile time and exposes them via
//! [`all_metric_layers`] and [`metric_layer`].

use landslide_map_landslide_models::{LANDSLIDES_SOURCE, Metric, Stop, Visibility};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::StyleError;
use crate::interpolate::{coalesced_property, interpolate_expr};

/// A metric's circle layer pair loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricLayerDef {
    /// Metric this layer pair encodes.
    pub metric: Metric,
    /// Solid fill color of the primary circles.
    pub color: String,
    /// Minimum zoom at which either layer is drawn.
    pub min_zoom: f64,
    /// Visibility at registration time.
    #[serde(default)]
    pub visibility: Visibility,
    /// `[value, radius]` breakpoints of the primary circles.
    #[serde(deserialize_with = "deserialize_stops")]
    pub stops: Vec<Stop>,
    /// Blurred shadow drawn beneath the primary circles.
    pub shadow: ShadowDef,
}

/// Shadow layer styling.
#[derive(Debug, Clone, Deserialize)]
pub struct ShadowDef {
    /// `[value, radius]` breakpoints, usually a few pixels wider than the
    /// primary stops.
    #[serde(deserialize_with = "deserialize_stops")]
    pub stops: Vec<Stop>,
    /// `circle-blur` amount.
    pub blur: f64,
}

fn deserialize_stops<'de, D>(deserializer: D) -> Result<Vec<Stop>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let pairs: Vec<[f64; 2]> = Vec::deserialize(deserializer)?;
    Ok(pairs.into_iter().map(|[v, s]| Stop::new(v, s)).collect())
}

impl MetricLayerDef {
    /// `["all", ["has", prop], [">", ["coalesce", ["get", prop], 0], 0]]`
    ///
    /// Features without a positive value for the metric are not drawn.
    #[must_use]
    pub fn filter(&self) -> Value {
        let property = self.metric.property();
        json!([
            "all",
            ["has", property],
            [">", coalesced_property(property), 0]
        ])
    }

    /// The primary circle layer.
    #[must_use]
    pub fn main_layer(&self) -> Value {
        json!({
            "id": self.metric.layer_id(),
            "type": "circle",
            "source": LANDSLIDES_SOURCE,
            "minzoom": self.min_zoom,
            "layout": { "visibility": self.visibility },
            "filter": self.filter(),
            "paint": {
                "circle-color": self.color,
                "circle-opacity": 0.9,
                "circle-stroke-color": "rgba(0,0,0,0.35)",
                "circle-stroke-width": 0.9,
                "circle-radius": interpolate_expr(
                    coalesced_property(self.metric.property()),
                    &self.stops,
                ),
            },
        })
    }

    /// The shadow layer, meant to be inserted beneath [`Self::main_layer`].
    #[must_use]
    pub fn shadow_layer(&self) -> Value {
        json!({
            "id": self.metric.shadow_layer_id(),
            "type": "circle",
            "source": LANDSLIDES_SOURCE,
            "minzoom": self.min_zoom,
            "layout": { "visibility": self.visibility },
            "filter": self.filter(),
            "paint": {
                "circle-radius": interpolate_expr(
                    coalesced_property(self.metric.property()),
                    &self.shadow.stops,
                ),
                "circle-color": "rgba(0, 0, 0, 1)",
                "circle-blur": self.shadow.blur,
                "circle-opacity": 0.5,
            },
        })
    }
}

/// Parses and validates a single metric layer definition.
///
/// # Errors
///
/// Returns [`StyleError::Toml`] if the document does not parse and
/// [`StyleError::InvalidLayer`] if it has no stops or no color.
pub fn parse_metric_layer(toml_str: &str) -> Result<MetricLayerDef, StyleError> {
    let def: MetricLayerDef = toml::de::from_str(toml_str)?;

    if def.color.trim().is_empty() {
        return Err(StyleError::InvalidLayer {
            message: format!("{} has an empty color", def.metric),
        });
    }
    if def.stops.is_empty() || def.shadow.stops.is_empty() {
        return Err(StyleError::InvalidLayer {
            message: format!("{} needs at least one stop for both layers", def.metric),
        });
    }

    Ok(def)
}

// ── Compile-time embedded TOML files ────────────────────────────────

const LAYER_TOMLS: &[(&str, &str)] = &[
    ("costpm", include_str!("../layers/costpm.toml")),
    ("weighted", include_str!("../layers/weighted.toml")),
];

#[cfg(test)]
const EXPECTED_LAYER_COUNT: usize = 2;

/// Returns every metric layer definition, in registration order.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_metric_layers() -> Vec<MetricLayerDef> {
    LAYER_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_metric_layer(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse metric layer '{name}': {e}"))
        })
        .collect()
}

/// Returns the definition for `metric`.
///
/// # Panics
///
/// Panics if no embedded definition exists for `metric`, which the tests
/// rule out.
#[must_use]
pub fn metric_layer(metric: Metric) -> MetricLayerDef {
    all_metric_layers()
        .into_iter()
        .find(|def| def.metric == metric)
        .unwrap_or_else(|| panic!("No layer definition registered for metric '{metric}'"))
}
