#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Popup content for a clicked landslide incident.
//!
//! Incident properties come straight from the source `GeoJSON` with no
//! schema, so every field is read leniently (see [`fields`]) and rendered
//! as `—` when it is absent or unusable. Formatting never fails.

pub mod fields;

use landslide_map_landslide_models::{FeatureRecord, MISSING};
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Unique incident identifier.
pub const ID_KEY: &str = "Unique APS-Code";
/// County name.
pub const COUNTY_KEY: &str = "County";
/// Road the incident occurred along.
pub const ROUTE_KEY: &str = "Route";
/// Repair cost per mile, in dollars.
pub const COST_KEY: &str = "Cost per Mile";
/// Mile point at the middle of the affected stretch.
pub const MID_MP_KEY: &str = "Mid MP";
/// First mile point of the affected stretch.
pub const MIN_MP_KEY: &str = "Min MP";
/// Last mile point of the affected stretch.
pub const MAX_MP_KEY: &str = "Max MP";
/// Length of the affected stretch, in miles.
pub const LENGTH_KEY: &str = "Total Distance";
/// Annual average daily traffic.
pub const AADT_KEY: &str = "AADT";
/// Occurrence count keys, in lookup order.
pub const OCCURRENCE_KEYS: &[&str] = &["Occurrences", "occurrences", "Weighted Occurrences"];
/// Longitude keys, consulted before the feature geometry.
pub const LON_KEYS: &[&str] = &["X", "x"];
/// Latitude keys, consulted before the feature geometry.
pub const LAT_KEYS: &[&str] = &["Y", "y"];

/// Which optional fields a popup includes.
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
pub enum PopupVariant {
    /// Everything, including mile point range and total length.
    #[default]
    Extended,
    /// Identity, metrics and mid mile point only.
    Condensed,
}

impl PopupVariant {
    const fn heading_class(self) -> &'static str {
        match self {
            Self::Extended => "text-xl font-bold",
            Self::Condensed => "text-lg font-semibold",
        }
    }
}

/// Popup formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupConfig {
    /// Field set to include.
    pub variant: PopupVariant,
    /// HTML-escape property values. When `false` values are written as
    /// markup verbatim, which is only safe for trusted data.
    pub escape: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self::extended()
    }
}

impl PopupConfig {
    #[must_use]
    pub const fn extended() -> Self {
        Self {
            variant: PopupVariant::Extended,
            escape: true,
        }
    }

    #[must_use]
    pub const fn condensed() -> Self {
        Self {
            variant: PopupVariant::Condensed,
            escape: true,
        }
    }
}

/// Display-ready values for one incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupFields {
    pub id: String,
    pub county: String,
    pub route: String,
    pub occurrences: String,
    pub cost: String,
    pub aadt: String,
    pub total_length: String,
    pub min_mp: String,
    pub max_mp: String,
    pub mid_mp: String,
    /// Street View URL, present only when both coordinates are numeric.
    pub street_view: Option<String>,
}

impl PopupFields {
    /// Reads every field from `record`.
    #[must_use]
    pub fn from_record(record: &FeatureRecord) -> Self {
        let lon = fields::num(record.first_of(LON_KEYS))
            .or_else(|| record.coordinates.map(|[lon, _]| lon).filter(|v| v.is_finite()));
        let lat = fields::num(record.first_of(LAT_KEYS))
            .or_else(|| record.coordinates.map(|[_, lat]| lat).filter(|v| v.is_finite()));

        Self {
            id: fields::safe(record.get(ID_KEY)),
            county: fields::safe(record.get(COUNTY_KEY)),
            route: fields::safe(record.get(ROUTE_KEY)),
            occurrences: fields::count(record.first_of(OCCURRENCE_KEYS)),
            cost: fields::dollars(record.get(COST_KEY)),
            aadt: fields::count(record.get(AADT_KEY)),
            total_length: fields::safe(record.get(LENGTH_KEY)),
            min_mp: fields::safe(record.get(MIN_MP_KEY)),
            max_mp: fields::safe(record.get(MAX_MP_KEY)),
            mid_mp: fields::safe(record.get(MID_MP_KEY)),
            street_view: lon.zip(lat).map(|(lon, lat)| street_view_url(lon, lat)),
        }
    }
}

/// Google Maps panorama URL centred on a point.
#[must_use]
pub fn street_view_url(lon: f64, lat: f64) -> String {
    format!("https://www.google.com/maps/@?api=1&map_action=pano&viewpoint={lat},{lon}")
}

/// Renders the popup HTML for `record`.
#[must_use]
pub fn format_popup(record: &FeatureRecord, config: &PopupConfig) -> String {
    render(&PopupFields::from_record(record), config).into_string()
}

fn render(fields: &PopupFields, config: &PopupConfig) -> Markup {
    let text = |value: &str| -> Markup {
        if config.escape {
            html! { (value) }
        } else {
            PreEscaped(value.to_string())
        }
    };
    let extended = config.variant == PopupVariant::Extended;

    let street_view = html! {
        @if let Some(url) = &fields.street_view {
            a class="text-blue-600 hover:text-blue-900 underline font-medium"
                href=(url) target="_blank" rel="noopener" { "Open Street View" }
        } @else {
            "Street View: " (MISSING)
        }
    };

    html! {
        h2 class=(config.variant.heading_class()) { "Landslide ID: " (text(&fields.id)) }
        p {
            "Landslide in " (text(&fields.county)) " County, occurred along " (text(&fields.route))
            br;
            br; strong { "Number of Occurrences" } ": " (text(&fields.occurrences))
            br; strong { "Cost per Mile" } ": " (text(&fields.cost))
            br; strong { "AADT" } ": " (text(&fields.aadt))
            @if extended {
                br; strong { "Total Length" } ": " (text(&fields.total_length)) " miles"
                br; (PreEscaped("&emsp;")) "From Mile Point " (text(&fields.min_mp)) " to " (text(&fields.max_mp))
            }
            br; strong { "Mid Mile Point" } ": " (text(&fields.mid_mp))
            (PreEscaped(" &nbsp;•&nbsp; ")) (street_view)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> FeatureRecord {
        serde_json::from_value(value).unwrap()
    }

    fn pike() -> FeatureRecord {
        record(json!({
            "properties": {
                "County": "Pike",
                "Cost per Mile": 1_500_000,
                "Occurrences": 3,
                "X": -82.5,
                "Y": 37.4
            }
        }))
    }

    #[test]
    fn formats_known_incident() {
        let html = format_popup(&pike(), &PopupConfig::default());
        assert!(html.contains("$1,500,000"), "{html}");
        assert!(html.contains("viewpoint=37.4,-82.5"), "{html}");
        assert!(html.contains("Landslide in Pike County"), "{html}");
        assert!(html.contains(": 3"));
    }

    #[test]
    fn missing_cost_renders_sentinel() {
        let mut record = pike();
        record.properties.remove(COST_KEY);
        let html = format_popup(&record, &PopupConfig::default());
        assert!(html.contains("<strong>Cost per Mile</strong>: —"), "{html}");
    }

    #[test]
    fn non_numeric_cost_renders_sentinel() {
        let mut record = pike();
        record.properties.insert(COST_KEY.to_string(), json!("pending"));
        let fields = PopupFields::from_record(&record);
        assert_eq!(fields.cost, MISSING);
    }

    #[test]
    fn empty_record_never_fails() {
        let fields = PopupFields::from_record(&FeatureRecord::default());
        assert_eq!(fields.id, MISSING);
        assert_eq!(fields.occurrences, MISSING);
        assert_eq!(fields.aadt, MISSING);
        assert_eq!(fields.street_view, None);

        let html = format_popup(&FeatureRecord::default(), &PopupConfig::condensed());
        assert!(html.contains("Street View: —"), "{html}");
        assert!(!html.contains("<a "));
    }

    #[test]
    fn coordinates_fall_back_to_geometry() {
        let record = record(json!({
            "properties": { "X": "", "Y": "", "x": "" },
            "coordinates": [-83.1, 37.9]
        }));
        let fields = PopupFields::from_record(&record);
        assert_eq!(
            fields.street_view.as_deref(),
            Some("https://www.google.com/maps/@?api=1&map_action=pano&viewpoint=37.9,-83.1")
        );
    }

    #[test]
    fn one_missing_coordinate_drops_link() {
        let record = record(json!({ "properties": { "X": -82.5, "Y": "north" } }));
        assert_eq!(PopupFields::from_record(&record).street_view, None);
    }

    #[test]
    fn occurrence_and_traffic_counts_are_grouped() {
        let record = record(json!({
            "properties": { "Weighted Occurrences": 1_204, "AADT": 15_300 }
        }));
        let fields = PopupFields::from_record(&record);
        assert_eq!(fields.occurrences, "1,204");
        assert_eq!(fields.aadt, "15,300");
    }

    #[test]
    fn variant_controls_mile_point_range() {
        let mut record = pike();
        record.properties.insert(MIN_MP_KEY.to_string(), json!(1.2));
        record.properties.insert(MAX_MP_KEY.to_string(), json!(3.4));

        let extended = format_popup(&record, &PopupConfig::extended());
        assert!(extended.contains("From Mile Point 1.2 to 3.4"), "{extended}");
        assert!(extended.contains("Total Length"));

        let condensed = format_popup(&record, &PopupConfig::condensed());
        assert!(!condensed.contains("From Mile Point"), "{condensed}");
        assert!(!condensed.contains("Total Length"));
        assert!(condensed.contains("Mid Mile Point"));
    }

    #[test]
    fn escaping_is_configurable() {
        let mut record = pike();
        record
            .properties
            .insert(ROUTE_KEY.to_string(), json!("<b>KY-80</b>"));

        let escaped = format_popup(&record, &PopupConfig::extended());
        assert!(escaped.contains("&lt;b&gt;KY-80&lt;/b&gt;"), "{escaped}");

        let raw = format_popup(
            &record,
            &PopupConfig {
                escape: false,
                ..PopupConfig::extended()
            },
        );
        assert!(raw.contains("<b>KY-80</b>"), "{raw}");
    }

    #[test]
    fn variant_parses_from_query_value() {
        assert_eq!("condensed".parse::<PopupVariant>().unwrap(), PopupVariant::Condensed);
        assert_eq!(PopupVariant::default(), PopupVariant::Extended);
    }
}
