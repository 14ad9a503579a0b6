//! The landslide map state object and metric switching.

use geojson::FeatureCollection;
use landslide_map_landslide_models::{LANDSLIDES_SOURCE, Metric, Visibility};
use landslide_map_legend::{LayerStyle, LegendView, build_legend};
use landslide_map_style::layers::{
    CITY_LABELS_URL, COUNTY_LABELS_URL, city_labels_layer, county_labels_layer,
    inline_geojson_source, label_sources, sky, terrain,
};
use landslide_map_style::registry::all_metric_layers;
use serde_json::Value;

use crate::MapError;
use crate::bounds::{FitOptions, collection_bounds};
use crate::engine::MapEngine;

const VISIBILITY: &str = "visibility";

/// Where label data lives and how the camera frames the incidents.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub county_labels_url: String,
    pub city_labels_url: String,
    pub fit: FitOptions,
    /// Metric shown when the map opens.
    pub initial_metric: Metric,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            county_labels_url: COUNTY_LABELS_URL.to_string(),
            city_labels_url: CITY_LABELS_URL.to_string(),
            fit: FitOptions::default(),
            initial_metric: Metric::default(),
        }
    }
}

/// A composed landslide map: the engine it drew into, the active metric
/// and the legend describing it.
///
/// Exactly one metric's layer pair is visible at any time.
#[derive(Debug, Clone)]
pub struct LandslideMap<E: MapEngine> {
    engine: E,
    metric: Metric,
    legend: Option<LegendView>,
}

impl<E: MapEngine> LandslideMap<E> {
    /// Registers every source and layer on `engine`, fits the camera to
    /// `incidents` and activates the initial metric.
    ///
    /// Each metric's shadow layer is inserted directly beneath its main
    /// layer. Labels are drawn above all incident layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects a source or layer, or the
    /// incidents cannot be serialized.
    pub fn new(
        mut engine: E,
        incidents: &FeatureCollection,
        options: &MapOptions,
    ) -> Result<Self, MapError> {
        engine.set_terrain(terrain());
        engine.set_sky(sky());

        engine.add_source(
            LANDSLIDES_SOURCE,
            inline_geojson_source(serde_json::to_value(incidents)?),
        )?;
        for (id, source) in label_sources(&options.county_labels_url, &options.city_labels_url) {
            engine.add_source(id, source)?;
        }

        match collection_bounds(incidents) {
            Some(bounds) => engine.fit_bounds(bounds, options.fit),
            None => log::warn!("Incident collection has no coordinates, leaving camera as is"),
        }

        for def in all_metric_layers() {
            engine.add_layer(def.main_layer(), None)?;
            engine.add_layer(def.shadow_layer(), Some(def.metric.layer_id()))?;
        }
        engine.add_layer(county_labels_layer(), None)?;
        engine.add_layer(city_labels_layer(), None)?;

        log::info!(
            "Composed map with {} incidents",
            incidents.features.len()
        );

        let mut map = Self {
            engine,
            metric: options.initial_metric,
            legend: None,
        };
        map.set_metric(options.initial_metric)?;
        Ok(map)
    }

    /// Currently active metric.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Legend of the active metric, if its styling yields one.
    #[must_use]
    pub const fn legend(&self) -> Option<&LegendView> {
        self.legend.as_ref()
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Shows `metric`'s layer pair, hides every other pair and rebuilds
    /// the legend. Applying the active metric again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownLayer`] if a metric layer is missing from
    /// the engine, in which case no visibility is touched.
    pub fn set_metric(&mut self, metric: Metric) -> Result<Option<LegendView>, MapError> {
        if let Some(missing) = Metric::all()
            .iter()
            .flat_map(|m| m.layer_ids())
            .find(|id| !self.engine.has_layer(id))
        {
            return Err(MapError::UnknownLayer(missing.to_string()));
        }

        for other in Metric::all() {
            let visibility = Visibility::from_shown(*other == metric);
            for layer_id in other.layer_ids() {
                self.engine.set_layout_property(
                    layer_id,
                    VISIBILITY,
                    Value::from(visibility.as_ref()),
                )?;
            }
        }

        log::debug!("Active metric is now {metric}");
        self.metric = metric;
        self.legend = self.legend_for(metric, None);
        Ok(self.legend.clone())
    }

    /// Builds the legend for `metric` from its main layer's current paint
    /// properties, without switching to it.
    #[must_use]
    pub fn legend_for(&self, metric: Metric, title: Option<&str>) -> Option<LegendView> {
        build_legend(&self.layer_style(metric), metric, title)
    }

    /// Reads `circle-color` and `circle-radius` back from `metric`'s main
    /// layer.
    #[must_use]
    pub fn layer_style(&self, metric: Metric) -> LayerStyle {
        let layer_id = metric.layer_id();
        LayerStyle {
            color: self
                .engine
                .paint_property(layer_id, "circle-color")
                .and_then(|v| v.as_str().map(str::to_string)),
            radius: self.engine.paint_property(layer_id, "circle-radius"),
        }
    }

    /// Visibility of `metric`'s main layer. An unset value is visible.
    #[must_use]
    pub fn visibility(&self, metric: Metric) -> Visibility {
        self.engine
            .layout_property(metric.layer_id(), VISIBILITY)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}
