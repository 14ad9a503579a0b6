//! Fixed sources, label layers and atmosphere settings.

use landslide_map_landslide_models::{
    CITY_LABELS_LAYER, CITY_LABELS_SOURCE, COUNTY_LABELS_LAYER, COUNTY_LABELS_SOURCE,
    TERRAIN_SOURCE,
};
use serde_json::{Value, json};

/// Counties whose names are drawn; the rest of the region stays unlabeled.
pub const LABELED_COUNTIES: &[&str] = &[
    "LAWRENCE", "JOHNSON", "MARTIN", "FLOYD", "PIKE", "KNOTT", "LETCHER",
];

/// Default URL of the county label points, relative to the served root.
pub const COUNTY_LABELS_URL: &str = "./data/appal-county-labels.geojson";

/// Default URL of the city label points, relative to the served root.
pub const CITY_LABELS_URL: &str = "./data/cities.geojson";

/// Vertical exaggeration applied to the terrain mesh.
pub const TERRAIN_EXAGGERATION: f64 = 2.0;

/// Initial camera pitch, in degrees.
pub const INITIAL_PITCH: f64 = 55.0;

/// Initial camera bearing, in degrees.
pub const INITIAL_BEARING: f64 = 35.0;

/// Maximum pitch the map allows, in degrees.
pub const MAX_PITCH: f64 = 85.0;

/// A `GeoJSON` source whose data is inlined into the style.
#[must_use]
pub fn inline_geojson_source(data: Value) -> Value {
    json!({ "type": "geojson", "data": data })
}

/// A `GeoJSON` source the browser fetches itself.
#[must_use]
pub fn url_geojson_source(url: &str) -> Value {
    json!({ "type": "geojson", "data": url })
}

/// `(id, source)` pairs for both label collections.
#[must_use]
pub fn label_sources(county_url: &str, city_url: &str) -> [(&'static str, Value); 2] {
    [
        (COUNTY_LABELS_SOURCE, url_geojson_source(county_url)),
        (CITY_LABELS_SOURCE, url_geojson_source(city_url)),
    ]
}

/// County name symbols, hidden past zoom 11.
#[must_use]
pub fn county_labels_layer() -> Value {
    json!({
        "id": COUNTY_LABELS_LAYER,
        "type": "symbol",
        "source": COUNTY_LABELS_SOURCE,
        "maxzoom": 11,
        "filter": ["in", ["get", "NAME"], ["literal", LABELED_COUNTIES]],
        "layout": {
            "symbol-placement": "point",
            "text-field": ["to-string", ["get", "NAME"]],
            "text-font": ["Montserrat Bold", "Montserrat SemiBold"],
            "text-size": ["interpolate", ["linear"], ["zoom"], 7, 14, 12, 15, 15, 16],
            "text-allow-overlap": false,
            "text-anchor": "center",
        },
        "paint": {
            "text-color": "#FFFFFF",
            "text-halo-color": "#222",
            "text-halo-width": 1.5,
            "text-halo-blur": 2,
        },
    })
}

/// City name symbols, shown from zoom 10.
#[must_use]
pub fn city_labels_layer() -> Value {
    json!({
        "id": CITY_LABELS_LAYER,
        "type": "symbol",
        "source": CITY_LABELS_SOURCE,
        "minzoom": 10,
        "layout": {
            "symbol-placement": "point",
            "text-field": ["to-string", ["get", "NAME2"]],
            "text-font": ["Montserrat SemiBold", "Montserrat Medium"],
            "text-size": ["interpolate", ["linear"], ["zoom"], 10, 12, 12, 13, 15, 15],
            "text-allow-overlap": false,
            "text-anchor": "center",
        },
        "paint": {
            "text-color": "#ffffff",
            "text-halo-color": "#222",
            "text-halo-width": 1.2,
            "text-halo-blur": 2,
        },
    })
}

/// Terrain settings backed by the base style's DEM source.
#[must_use]
pub fn terrain() -> Value {
    json!({ "source": TERRAIN_SOURCE, "exaggeration": TERRAIN_EXAGGERATION })
}

/// Sky and fog; the atmosphere fades out between zoom 10 and 12.
#[must_use]
pub fn sky() -> Value {
    json!({
        "sky-color": "#61C2FEFF",
        "sky-horizon-blend": 0.5,
        "horizon-color": "#EBF1F4FF",
        "horizon-fog-blend": 0.5,
        "fog-color": "#B5B5B5FF",
        "fog-ground-blend": 0.5,
        "atmosphere-blend": ["interpolate", ["linear"], ["zoom"], 0, 1, 10, 1, 12, 0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_filter_lists_every_labeled_county() {
        let layer = county_labels_layer();
        let literal = &layer["filter"][2][1];
        assert_eq!(literal.as_array().map(Vec::len), Some(LABELED_COUNTIES.len()));
        assert_eq!(layer["source"], COUNTY_LABELS_SOURCE);
    }

    #[test]
    fn label_layers_reference_label_sources() {
        let [(county_id, county), (city_id, city)] =
            label_sources(COUNTY_LABELS_URL, CITY_LABELS_URL);
        assert_eq!(county_id, county_labels_layer()["source"]);
        assert_eq!(city_id, city_labels_layer()["source"]);
        assert_eq!(county["data"], COUNTY_LABELS_URL);
        assert_eq!(city["data"], CITY_LABELS_URL);
    }

    #[test]
    fn terrain_uses_dem_source() {
        assert_eq!(terrain()["source"], TERRAIN_SOURCE);
        assert_eq!(sky()["atmosphere-blend"][0], "interpolate");
    }
}
