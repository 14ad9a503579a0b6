#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Landslide incident metrics, layer identifiers, and feature record types.
//!
//! This crate defines the vocabulary shared by every other landslide-map
//! package: the two metrics that can drive marker styling, the `MapLibre`
//! layer ids each metric owns, interpolation stops, and the loosely typed
//! feature records handed to the popup formatter.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Source id of the incident `GeoJSON` collection.
pub const LANDSLIDES_SOURCE: &str = "landslides";

/// Source id of the county label points.
pub const COUNTY_LABELS_SOURCE: &str = "county_labels";

/// Source id of the city label points.
pub const CITY_LABELS_SOURCE: &str = "city_labels";

/// Source id of the raster DEM used for terrain.
pub const TERRAIN_SOURCE: &str = "terrainSource";

/// Layer id of the county label symbols.
pub const COUNTY_LABELS_LAYER: &str = "county-labels";

/// Layer id of the city label symbols.
pub const CITY_LABELS_LAYER: &str = "city-labels";

/// Display value for any field that is absent or unusable.
pub const MISSING: &str = "—";

/// The attribute currently driving the size encoding of incident markers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Metric {
    /// Repair cost per mile of roadway, in US dollars.
    #[default]
    #[serde(rename = "costpm")]
    #[strum(serialize = "costpm")]
    CostPerMile,
    /// Occurrence count weighted by severity.
    #[serde(rename = "weighted")]
    #[strum(serialize = "weighted")]
    WeightedOccurrences,
}

impl Metric {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::CostPerMile, Self::WeightedOccurrences]
    }

    /// Id of the primary circle layer styled by this metric.
    #[must_use]
    pub const fn layer_id(self) -> &'static str {
        match self {
            Self::CostPerMile => "landslides-costpm",
            Self::WeightedOccurrences => "landslides-weightedocc",
        }
    }

    /// Id of the blurred shadow layer drawn beneath [`Self::layer_id`].
    #[must_use]
    pub const fn shadow_layer_id(self) -> &'static str {
        match self {
            Self::CostPerMile => "landslides-costpm-shadow",
            Self::WeightedOccurrences => "landslides-weightedocc-shadow",
        }
    }

    /// Both layers owned by this metric, shadow first.
    #[must_use]
    pub const fn layer_ids(self) -> [&'static str; 2] {
        [self.shadow_layer_id(), self.layer_id()]
    }

    /// Feature property that carries this metric's value.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::CostPerMile => "Cost per Mile",
            Self::WeightedOccurrences => "Weighted Occurrences",
        }
    }

    /// Default legend title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CostPerMile => "Cost per Mile",
            Self::WeightedOccurrences => "Number of Occurrences",
        }
    }

    /// Label shown next to this metric's radio button.
    #[must_use]
    pub const fn switch_label(self) -> &'static str {
        match self {
            Self::CostPerMile => "Cost per Mile",
            Self::WeightedOccurrences => "Weighted Occurrences",
        }
    }
}

/// `MapLibre` layout `visibility` value.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    /// Layer is drawn.
    #[default]
    Visible,
    /// Layer is hidden.
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Hidden,
}

impl Visibility {
    /// `Visible` when `shown`, otherwise `Hidden`.
    #[must_use]
    pub const fn from_shown(shown: bool) -> Self {
        if shown { Self::Visible } else { Self::Hidden }
    }
}

/// One breakpoint of a linear interpolation: an input value and the
/// visual size it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Input value (e.g. cost per mile).
    pub threshold: f64,
    /// Output size (circle radius in pixels).
    pub size: f64,
}

impl Stop {
    #[must_use]
    pub const fn new(threshold: f64, size: f64) -> Self {
        Self { threshold, size }
    }
}

/// A clicked incident: its attribute bag plus the point it was drawn at.
///
/// Attributes are kept as raw JSON because the source data carries no
/// schema; missing, `null` and empty-string values are all treated as
/// absent by consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    /// Feature properties. `null` reads as empty.
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// `[longitude, latitude]` of the rendered feature, if known.
    ///
    /// Any `GeoJSON` position is accepted; altitude and anything past it
    /// is dropped, and a position without two finite numbers reads as
    /// `None`.
    #[serde(default, deserialize_with = "deserialize_position")]
    pub coordinates: Option<[f64; 2]>,
}

fn deserialize_properties<'de, D>(
    deserializer: D,
) -> Result<serde_json::Map<String, serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let properties: Option<serde_json::Map<String, serde_json::Value>> =
        Option::deserialize(deserializer)?;
    Ok(properties.unwrap_or_default())
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<Option<[f64; 2]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let Some(position) = value.as_array() else {
        return Ok(None);
    };
    let mut numbers = position
        .iter()
        .map(|v| v.as_f64().filter(|n| n.is_finite()));
    Ok(match (numbers.next().flatten(), numbers.next().flatten()) {
        (Some(lon), Some(lat)) => Some([lon, lat]),
        _ => None,
    })
}

impl FeatureRecord {
    /// Returns the value under `key` unless it is absent, `null` or `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        match self.properties.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            value => Some(value),
        }
    }

    /// First present value among `keys`, in order.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&serde_json::Value> {
        keys.iter().find_map(|key| self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_wire_names() {
        assert_eq!(Metric::CostPerMile.to_string(), "costpm");
        assert_eq!(
            "weighted".parse::<Metric>().unwrap(),
            Metric::WeightedOccurrences
        );
        assert!("bogus".parse::<Metric>().is_err());
        assert_eq!(
            serde_json::to_value(Metric::WeightedOccurrences).unwrap(),
            json!("weighted")
        );
    }

    #[test]
    fn layer_ids_are_distinct() {
        let mut ids: Vec<&str> = Metric::all().iter().flat_map(|m| m.layer_ids()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn record_get_treats_null_and_empty_as_missing() {
        let record: FeatureRecord = serde_json::from_value(json!({
            "properties": { "a": null, "b": "", "c": 0, "d": "x" }
        }))
        .unwrap();
        assert_eq!(record.get("a"), None);
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("c"), Some(&json!(0)));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.first_of(&["a", "b", "d"]), Some(&json!("x")));
        assert_eq!(record.coordinates, None);
    }

    #[test]
    fn record_keeps_lon_lat_of_three_dimensional_position() {
        let record: FeatureRecord =
            serde_json::from_value(json!({ "coordinates": [-82.5, 37.4, 210.0] })).unwrap();
        assert_eq!(record.coordinates, Some([-82.5, 37.4]));
        assert!(record.properties.is_empty());
    }

    #[test]
    fn record_tolerates_null_and_malformed_fields() {
        let record: FeatureRecord = serde_json::from_value(json!({
            "properties": null,
            "coordinates": null
        }))
        .unwrap();
        assert_eq!(record, FeatureRecord::default());

        for coordinates in [json!([-82.5]), json!(["west", 37.4]), json!("-82.5,37.4")] {
            let record: FeatureRecord =
                serde_json::from_value(json!({ "coordinates": coordinates })).unwrap();
            assert_eq!(record.coordinates, None);
        }
    }

    #[test]
    fn visibility_serializes_lowercase() {
        assert_eq!(Visibility::Hidden.to_string(), "none");
        assert_eq!(
            serde_json::to_value(Visibility::Visible).unwrap(),
            json!("visible")
        );
        assert_eq!(Visibility::from_shown(false), Visibility::Hidden);
        assert_eq!("none".parse::<Visibility>().unwrap(), Visibility::Hidden);
    }
}
