#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Graduated size legend for the active landslide metric.
//!
//! [`build_legend`] turns a layer's circle color and radius expression
//! into a [`LegendView`]: nested bubbles drawn largest first against a
//! shared baseline, plus one threshold label per bubble aligned to the
//! bubble's top edge. [`render`] turns the view into HTML.

pub mod format;
pub mod render;

use landslide_map_landslide_models::{Metric, Stop};
use landslide_map_style::interpolate::interpolate_stops;
use serde::{Deserialize, Serialize};

/// Fill color used when the layer has none.
pub const DEFAULT_COLOR: &str = "#888";

/// Smallest diameter any bubble (and the diagram itself) is drawn at.
pub const MIN_DIAMETER: u32 = 10;

/// The styling of a circle layer, as read back from the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    /// `circle-color` paint property.
    pub color: Option<String>,
    /// `circle-radius` paint property.
    pub radius: Option<serde_json::Value>,
}

/// One bubble of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendBubble {
    /// Diameter in pixels.
    pub diameter: u32,
}

/// One threshold label and its tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendRow {
    /// Breakpoint input value.
    pub threshold: f64,
    /// Circle radius at the breakpoint.
    pub size: f64,
    /// Bubble diameter in pixels.
    pub diameter: u32,
    /// Formatted label, e.g. `"≤ $5,000,000"`.
    pub label: String,
    /// Offset from the top of the diagram, in pixels.
    pub top: f64,
}

/// Everything needed to draw the legend for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendView {
    /// Metric the legend describes.
    pub metric: Metric,
    /// Heading text.
    pub title: String,
    /// Bubble fill color.
    pub color: String,
    /// Height and width of the diagram (the largest diameter), in pixels.
    pub extent: u32,
    /// Bubbles, largest first.
    pub bubbles: Vec<LegendBubble>,
    /// Labels, top to bottom (largest threshold first).
    pub rows: Vec<LegendRow>,
}

/// Display diameter for a radius: `max(10, round(2 × size))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn diameter(size: f64) -> u32 {
    let d = (size * 2.0).round().max(f64::from(MIN_DIAMETER));
    if d >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        d as u32
    }
}

/// Formats a threshold for `metric`: dollars for cost, a grouped integer
/// otherwise.
#[must_use]
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::CostPerMile => format::currency(value),
        Metric::WeightedOccurrences => format::grouped(value),
    }
}

/// Builds the legend for `metric` from its layer styling.
///
/// `title` overrides the metric's default heading. Returns `None` when the
/// radius is not a linear interpolate expression with at least one stop.
#[must_use]
pub fn build_legend(style: &LayerStyle, metric: Metric, title: Option<&str>) -> Option<LegendView> {
    let stops = style
        .radius
        .as_ref()
        .map(interpolate_stops)
        .unwrap_or_default();

    if stops.is_empty() {
        log::debug!("No interpolation stops for {metric}, skipping legend");
        return None;
    }

    Some(legend_from_stops(
        &stops,
        metric,
        style.color.as_deref().unwrap_or(DEFAULT_COLOR),
        title.unwrap_or_else(|| metric.title()),
    ))
}

/// Builds the legend from already extracted stops.
///
/// An empty `stops` yields a minimum-size diagram with no rows.
#[must_use]
pub fn legend_from_stops(stops: &[Stop], metric: Metric, color: &str, title: &str) -> LegendView {
    let mut ascending = stops.to_vec();
    ascending.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    let mut descending = ascending.clone();
    descending.reverse();

    let max_size = ascending
        .iter()
        .map(|stop| stop.size)
        .fold(f64::NEG_INFINITY, f64::max);
    let extent = diameter(max_size);

    let bubbles = descending
        .iter()
        .map(|stop| LegendBubble {
            diameter: diameter(stop.size),
        })
        .collect();

    let rows = descending
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let prefix = if i == 0 { '≥' } else { '≤' };
            LegendRow {
                threshold: stop.threshold,
                size: stop.size,
                diameter: diameter(stop.size),
                label: format!("{prefix} {}", format_value(metric, stop.threshold)),
                top: f64::from(extent) - 2.0 * stop.size,
            }
        })
        .collect();

    LegendView {
        metric,
        title: title.to_string(),
        color: color.to_string(),
        extent,
        bubbles,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cost_style() -> LayerStyle {
        LayerStyle {
            color: Some("#E4C64E".to_string()),
            radius: Some(json!([
                "interpolate",
                ["linear"],
                ["coalesce", ["get", "Cost per Mile"], 0],
                500_000,
                6,
                2_000_000,
                16,
                5_000_000,
                26,
                22_500_000,
                36
            ])),
        }
    }

    fn labels(view: &LegendView) -> Vec<&str> {
        view.rows.iter().map(|row| row.label.as_str()).collect()
    }

    #[test]
    fn cost_legend_geometry() {
        let view = build_legend(&cost_style(), Metric::CostPerMile, None).unwrap();
        assert_eq!(view.extent, 72);
        let diameters: Vec<u32> = view.bubbles.iter().map(|b| b.diameter).collect();
        assert_eq!(diameters, vec![72, 52, 32, 12]);
        let tops: Vec<f64> = view.rows.iter().map(|row| row.top).collect();
        assert_eq!(tops, vec![0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn cost_legend_labels() {
        let view = build_legend(&cost_style(), Metric::CostPerMile, None).unwrap();
        assert_eq!(view.title, "Cost per Mile");
        assert_eq!(view.color, "#E4C64E");
        assert_eq!(
            labels(&view),
            vec!["≥ $22,500,000", "≤ $5,000,000", "≤ $2,000,000", "≤ $500,000"]
        );
    }

    #[test]
    fn weighted_legend_labels() {
        let style = LayerStyle {
            color: Some("#50a1fa".to_string()),
            radius: Some(json!([
                "interpolate",
                ["linear"],
                ["coalesce", ["get", "Weighted Occurrences"], 0],
                6, 6, 12, 16, 18, 26, 26, 36
            ])),
        };
        let view = build_legend(&style, Metric::WeightedOccurrences, None).unwrap();
        assert_eq!(view.title, "Number of Occurrences");
        assert_eq!(labels(&view), vec!["≥ 26", "≤ 18", "≤ 12", "≤ 6"]);
    }

    #[test]
    fn descending_declaration_is_resorted() {
        let stops = [
            Stop::new(26.0, 36.0),
            Stop::new(6.0, 6.0),
            Stop::new(18.0, 26.0),
            Stop::new(12.0, 16.0),
        ];
        let view = legend_from_stops(&stops, Metric::WeightedOccurrences, "#000", "T");
        assert_eq!(view.extent, 72);
        assert_eq!(labels(&view), vec!["≥ 26", "≤ 18", "≤ 12", "≤ 6"]);
    }

    #[test]
    fn small_bubbles_are_floored() {
        let view = legend_from_stops(&[Stop::new(1.0, 2.0)], Metric::WeightedOccurrences, "#000", "T");
        assert_eq!(view.extent, MIN_DIAMETER);
        assert_eq!(view.bubbles, vec![LegendBubble { diameter: 10 }]);
        assert_eq!(labels(&view), vec!["≥ 1"]);
        assert!((view.rows[0].top - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_title_and_default_color() {
        let style = LayerStyle {
            color: None,
            ..cost_style()
        };
        let view = build_legend(&style, Metric::CostPerMile, Some("Repair cost")).unwrap();
        assert_eq!(view.title, "Repair cost");
        assert_eq!(view.color, DEFAULT_COLOR);
    }

    #[test]
    fn no_stops_means_no_legend() {
        assert!(build_legend(&LayerStyle::default(), Metric::CostPerMile, None).is_none());
        let style = LayerStyle {
            color: None,
            radius: Some(json!(6)),
        };
        assert!(build_legend(&style, Metric::CostPerMile, None).is_none());
    }
}
