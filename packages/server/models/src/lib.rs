#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the landslide map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the map's own state types to allow independent evolution of the
//! API contract.

use landslide_map_landslide_models::{Metric, Visibility};
use landslide_map_legend::LegendView;
use landslide_map_map::bounds::Bounds;
use landslide_map_map::help::InputProfile;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Visibility of one metric's layer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerVisibility {
    pub metric: Metric,
    pub visibility: Visibility,
}

/// A metric selection and the layer visibility it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricState {
    /// Selected metric.
    pub metric: Metric,
    /// Visibility of every metric, in registration order.
    pub layers: Vec<LayerVisibility>,
    /// Legend of the selected metric, if one can be built.
    pub legend: Option<LegendView>,
}

/// Query parameters for `GET /api/metric`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQuery {
    /// Metric to switch to. Defaults to the initial metric.
    pub metric: Option<Metric>,
}

/// Body of `POST /api/metric`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRequest {
    pub metric: Metric,
}

/// Query parameters for the legend endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendQuery {
    /// Metric to describe. Defaults to the initial metric.
    pub metric: Option<Metric>,
    /// Heading override.
    pub title: Option<String>,
}

/// Query parameters for the popup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupQuery {
    /// `extended` (default) or `condensed`.
    pub variant: Option<String>,
    /// Whether to HTML-escape property values. Defaults to `true`.
    pub escape: Option<bool>,
}

/// Rendered popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupResponse {
    pub html: String,
}

/// The camera framing computed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraResponse {
    /// Incident extent, `None` when the collection had no coordinates.
    pub bounds: Option<Bounds>,
    /// Fit padding, in pixels.
    pub padding: f64,
    /// Zoom the fit may not exceed.
    pub max_zoom: f64,
    /// Initial pitch, in degrees.
    pub pitch: f64,
    /// Initial bearing, in degrees.
    pub bearing: f64,
    /// Maximum pitch, in degrees.
    pub max_pitch: f64,
}

/// Query parameters for the help endpoint, taken from the browser's
/// media queries, user agent and local storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpQuery {
    /// `(any-pointer: coarse)` matched.
    #[serde(default)]
    pub any_coarse: bool,
    /// `(any-hover: hover)` matched.
    #[serde(default)]
    pub any_hover: bool,
    /// The user agent reports a mobile device.
    #[serde(default)]
    pub ua_mobile: bool,
    /// Show even if dismissed (the help button was pressed).
    #[serde(default)]
    pub force: bool,
    /// Stored value of the dismissal flag.
    pub dismissed: Option<String>,
}

/// Help overlay decision and markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpResponse {
    /// Whether the client should open the overlay.
    pub show: bool,
    /// Local storage key for the dismissal flag.
    pub storage_key: String,
    /// Detected input profile.
    pub profile: InputProfile,
    /// Dialog markup; empty when `show` is `false`.
    pub html: String,
}
