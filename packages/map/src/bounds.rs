//! Geographic extents and camera fitting.

use geo::BoundingRect;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Pixel size of a `MapLibre` tile at zoom 0.
const TILE_SIZE: f64 = 512.0;

/// Padding applied when fitting the camera to the incidents, in pixels.
pub const DEFAULT_FIT_PADDING: f64 = 20.0;

/// Zoom the initial fit never exceeds.
pub const DEFAULT_FIT_MAX_ZOOM: f64 = 12.0;

/// An axis-aligned longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// A zero-area box at a single point.
    #[must_use]
    pub const fn from_point(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, lon, lat)
    }

    /// Grows this box to cover `other`.
    pub fn extend(&mut self, other: &Self) {
        self.west = self.west.min(other.west);
        self.south = self.south.min(other.south);
        self.east = self.east.max(other.east);
        self.north = self.north.max(other.north);
    }

    /// This box grown by `by` on every side.
    #[must_use]
    pub fn inflate(&self, by: f64) -> Self {
        Self::new(
            self.west - by,
            self.south - by,
            self.east + by,
            self.north + by,
        )
    }

    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        [
            f64::midpoint(self.west, self.east),
            f64::midpoint(self.south, self.north),
        ]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Whether the box has no area (a point or a line).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

}

impl From<geo::Rect<f64>> for Bounds {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// Computes the extent of every geometry in `collection`.
///
/// Points, lines, polygons and multi-geometries all contribute their
/// coordinates. Features without geometry are skipped. Returns `None`
/// when nothing has coordinates.
#[must_use]
pub fn collection_bounds(collection: &FeatureCollection) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;

    for feature in &collection.features {
        let Some(geometry) = feature.geometry.clone() else {
            continue;
        };
        let geometry: geo::Geometry<f64> = match geometry.try_into() {
            Ok(g) => g,
            Err(e) => {
                log::warn!("Skipping unconvertible geometry: {e}");
                continue;
            }
        };
        let Some(rect) = geometry.bounding_rect() else {
            continue;
        };
        let rect = Bounds::from(rect);
        match bounds.as_mut() {
            Some(b) => b.extend(&rect),
            None => bounds = Some(rect),
        }
    }

    bounds
}

/// How the camera should frame a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitOptions {
    /// Space kept clear around the box, in pixels.
    pub padding: f64,
    /// Zoom the fit may not exceed.
    pub max_zoom: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_FIT_PADDING,
            max_zoom: DEFAULT_FIT_MAX_ZOOM,
        }
    }
}

/// The result of fitting the camera to a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Box being framed.
    pub bounds: Bounds,
    /// Padding around it, in pixels.
    pub padding: f64,
    /// Zoom ceiling.
    pub max_zoom: f64,
}

impl Camera {
    #[must_use]
    pub const fn fit(bounds: Bounds, options: FitOptions) -> Self {
        Self {
            bounds,
            padding: options.padding,
            max_zoom: options.max_zoom,
        }
    }

    /// The smallest region the camera can show: the bounds plus the
    /// padding, measured at the zoom ceiling.
    ///
    /// A single-point collection gives a zero-area box, so this is a
    /// square of twice the padding around the point.
    #[must_use]
    pub fn padded_region(&self) -> Bounds {
        self.bounds
            .inflate(self.padding * degrees_per_pixel(self.max_zoom))
    }
}

/// Degrees of longitude spanned by one pixel at `zoom`.
#[must_use]
pub fn degrees_per_pixel(zoom: f64) -> f64 {
    360.0 / (TILE_SIZE * zoom.exp2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: serde_json::Value) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    fn point(lon: f64, lat: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [lon, lat] }
        })
    }

    #[test]
    fn bounds_of_points() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [point(-82.5, 37.4), point(-83.1, 37.9), point(-82.0, 37.0)]
        }));
        assert_eq!(
            collection_bounds(&fc),
            Some(Bounds::new(-83.1, 37.0, -82.0, 37.9))
        );
    }

    #[test]
    fn bounds_include_polygon_rings() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                point(-82.5, 37.4),
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[[-84.0, 36.0], [-83.0, 36.0], [-83.0, 37.0], [-84.0, 36.0]]]]
                    }
                },
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        }));
        assert_eq!(
            collection_bounds(&fc),
            Some(Bounds::new(-84.0, 36.0, -82.5, 37.4))
        );
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let fc = collection(json!({ "type": "FeatureCollection", "features": [] }));
        assert_eq!(collection_bounds(&fc), None);
    }

    #[test]
    fn single_point_fit_is_padding_sized() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [point(-82.5, 37.4)]
        }));
        let bounds = collection_bounds(&fc).unwrap();
        assert!(bounds.is_degenerate());

        let camera = Camera::fit(bounds, FitOptions::default());
        let region = camera.padded_region();
        let pad = DEFAULT_FIT_PADDING * degrees_per_pixel(DEFAULT_FIT_MAX_ZOOM);
        assert!(pad > 0.0);
        assert!((region.width() - 2.0 * pad).abs() < 1e-12);
        assert!((region.height() - 2.0 * pad).abs() < 1e-12);
        let [lon, lat] = region.center();
        assert!((lon + 82.5).abs() < 1e-9);
        assert!((lat - 37.4).abs() < 1e-9);
    }

    #[test]
    fn zero_padding_keeps_bounds() {
        let bounds = Bounds::new(-84.0, 36.0, -82.0, 38.0);
        let camera = Camera::fit(
            bounds,
            FitOptions {
                padding: 0.0,
                max_zoom: 12.0,
            },
        );
        assert_eq!(camera.padded_region(), bounds);
    }
}
