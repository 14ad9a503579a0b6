//! The map engine seam and its in-memory implementation.
//!
//! [`MapEngine`] mirrors the slice of the `MapLibre` `Map` API the landslide
//! map relies on. [`StyleStore`] records every call and can render the
//! result as a style document for the browser to load.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::MapError;
use crate::bounds::{Bounds, Camera, FitOptions};

/// Operations the landslide map performs against a map.
pub trait MapEngine {
    /// Registers a data source.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DuplicateSource`] if `id` is taken.
    fn add_source(&mut self, id: &str, source: Value) -> Result<(), MapError>;

    /// Whether a source with `id` exists.
    fn has_source(&self, id: &str) -> bool;

    /// Adds a layer, beneath `before` when given, otherwise on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer has no id, its id is taken, its source
    /// is missing, or `before` does not exist.
    fn add_layer(&mut self, layer: Value, before: Option<&str>) -> Result<(), MapError>;

    /// Whether a layer with `id` exists.
    fn has_layer(&self, id: &str) -> bool;

    /// Reads a paint property.
    fn paint_property(&self, layer_id: &str, name: &str) -> Option<Value>;

    /// Reads a layout property.
    fn layout_property(&self, layer_id: &str, name: &str) -> Option<Value>;

    /// Writes a layout property.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownLayer`] if the layer does not exist.
    fn set_layout_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: Value,
    ) -> Result<(), MapError>;

    /// Frames `bounds` with the camera.
    fn fit_bounds(&mut self, bounds: Bounds, options: FitOptions);

    /// Enables 3D terrain.
    fn set_terrain(&mut self, terrain: Value);

    /// Sets sky and fog.
    fn set_sky(&mut self, sky: Value);
}

/// Records sources, layers and camera state in memory.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    sources: BTreeMap<String, Value>,
    layers: Vec<Value>,
    terrain: Option<Value>,
    sky: Option<Value>,
    camera: Option<Camera>,
}

impl StyleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers in draw order, bottom first.
    #[must_use]
    pub fn layers(&self) -> &[Value] {
        &self.layers
    }

    /// Layer ids in draw order, bottom first.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().filter_map(layer_id).collect()
    }

    #[must_use]
    pub fn source(&self, id: &str) -> Option<&Value> {
        self.sources.get(id)
    }

    /// The last fitted camera, if any.
    #[must_use]
    pub const fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| layer_id(l) == Some(id))
    }

    fn layer(&self, id: &str) -> Option<&Value> {
        self.layer_index(id).map(|i| &self.layers[i])
    }

    /// Merges everything recorded here into `base`, a `MapLibre` style
    /// document.
    ///
    /// Sources are added (replacing same-named base sources), layers are
    /// appended above the base layers, and terrain/sky replace the base
    /// settings when set. `pitch` and `bearing` are written when given.
    #[must_use]
    pub fn to_style_document(
        &self,
        base: &Value,
        pitch: Option<f64>,
        bearing: Option<f64>,
    ) -> Value {
        let mut doc = base.as_object().cloned().unwrap_or_default();
        doc.entry("version").or_insert_with(|| Value::from(8));

        let sources = doc
            .entry("sources")
            .or_insert_with(|| Value::Object(Map::new()));
        if !sources.is_object() {
            *sources = Value::Object(Map::new());
        }
        if let Some(sources) = sources.as_object_mut() {
            for (id, source) in &self.sources {
                sources.insert(id.clone(), source.clone());
            }
        }

        let layers = doc
            .entry("layers")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !layers.is_array() {
            *layers = Value::Array(Vec::new());
        }
        if let Some(layers) = layers.as_array_mut() {
            layers.extend(self.layers.iter().cloned());
        }

        if let Some(terrain) = &self.terrain {
            doc.insert("terrain".to_string(), terrain.clone());
        }
        if let Some(sky) = &self.sky {
            doc.insert("sky".to_string(), sky.clone());
        }
        if let Some(pitch) = pitch {
            doc.insert("pitch".to_string(), Value::from(pitch));
        }
        if let Some(bearing) = bearing {
            doc.insert("bearing".to_string(), Value::from(bearing));
        }

        Value::Object(doc)
    }
}

fn layer_id(layer: &Value) -> Option<&str> {
    layer.get("id").and_then(Value::as_str)
}

impl MapEngine for StyleStore {
    fn add_source(&mut self, id: &str, source: Value) -> Result<(), MapError> {
        if self.sources.contains_key(id) {
            return Err(MapError::DuplicateSource(id.to_string()));
        }
        log::debug!("Adding source {id}");
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_layer(&mut self, layer: Value, before: Option<&str>) -> Result<(), MapError> {
        if !layer.is_object() {
            return Err(MapError::InvalidLayer {
                message: "layer must be a JSON object".to_string(),
            });
        }
        let id = layer_id(&layer)
            .ok_or_else(|| MapError::InvalidLayer {
                message: "layer has no string id".to_string(),
            })?
            .to_string();

        if self.has_layer(&id) {
            return Err(MapError::DuplicateLayer(id));
        }

        if let Some(source_id) = layer.get("source").and_then(Value::as_str)
            && !self.has_source(source_id)
        {
            return Err(MapError::MissingSource {
                layer: id,
                source_id: source_id.to_string(),
            });
        }

        let index = match before {
            Some(before) => self
                .layer_index(before)
                .ok_or_else(|| MapError::UnknownLayer(before.to_string()))?,
            None => self.layers.len(),
        };

        log::debug!("Adding layer {id} at position {index}");
        self.layers.insert(index, layer);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layer_index(id).is_some()
    }

    fn paint_property(&self, layer_id: &str, name: &str) -> Option<Value> {
        self.layer(layer_id)?.get("paint")?.get(name).cloned()
    }

    fn layout_property(&self, layer_id: &str, name: &str) -> Option<Value> {
        self.layer(layer_id)?.get("layout")?.get(name).cloned()
    }

    fn set_layout_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: Value,
    ) -> Result<(), MapError> {
        let index = self
            .layer_index(layer_id)
            .ok_or_else(|| MapError::UnknownLayer(layer_id.to_string()))?;

        let Some(layer) = self.layers[index].as_object_mut() else {
            return Err(MapError::InvalidLayer {
                message: format!("layer '{layer_id}' is not an object"),
            });
        };
        let layout = layer
            .entry("layout")
            .or_insert_with(|| Value::Object(Map::new()));
        if !layout.is_object() {
            *layout = Value::Object(Map::new());
        }
        if let Some(layout) = layout.as_object_mut() {
            layout.insert(name.to_string(), value);
        }
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Bounds, options: FitOptions) {
        log::debug!("Fitting camera to {bounds:?}");
        self.camera = Some(Camera::fit(bounds, options));
    }

    fn set_terrain(&mut self, terrain: Value) {
        self.terrain = Some(terrain);
    }

    fn set_sky(&mut self, sky: Value) {
        self.sky = Some(sky);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> StyleStore {
        let mut store = StyleStore::new();
        store
            .add_source("points", json!({ "type": "geojson", "data": "./p.geojson" }))
            .unwrap();
        store
            .add_layer(
                json!({
                    "id": "main",
                    "type": "circle",
                    "source": "points",
                    "paint": { "circle-color": "#fff" }
                }),
                None,
            )
            .unwrap();
        store
    }

    #[test]
    fn before_inserts_beneath() {
        let mut store = store();
        store
            .add_layer(json!({ "id": "shadow", "source": "points" }), Some("main"))
            .unwrap();
        store.add_layer(json!({ "id": "top" }), None).unwrap();
        assert_eq!(store.layer_ids(), vec!["shadow", "main", "top"]);
    }

    #[test]
    fn rejects_bad_layers() {
        let mut store = store();
        assert!(matches!(
            store.add_layer(json!({ "id": "main" }), None),
            Err(MapError::DuplicateLayer(_))
        ));
        assert!(matches!(
            store.add_layer(json!({ "id": "x", "source": "nope" }), None),
            Err(MapError::MissingSource { .. })
        ));
        assert!(matches!(
            store.add_layer(json!({ "id": "x" }), Some("nope")),
            Err(MapError::UnknownLayer(_))
        ));
        assert!(matches!(
            store.add_layer(json!({ "type": "circle" }), None),
            Err(MapError::InvalidLayer { .. })
        ));
        assert!(matches!(
            store.add_source("points", json!({})),
            Err(MapError::DuplicateSource(_))
        ));
    }

    #[test]
    fn layout_properties_round_trip() {
        let mut store = store();
        assert_eq!(store.layout_property("main", "visibility"), None);
        store
            .set_layout_property("main", "visibility", json!("none"))
            .unwrap();
        assert_eq!(
            store.layout_property("main", "visibility"),
            Some(json!("none"))
        );
        assert_eq!(
            store.paint_property("main", "circle-color"),
            Some(json!("#fff"))
        );
        assert!(matches!(
            store.set_layout_property("ghost", "visibility", json!("none")),
            Err(MapError::UnknownLayer(_))
        ));
    }

    #[test]
    fn style_document_merges_into_base() {
        let mut store = store();
        store.set_sky(json!({ "sky-color": "#000" }));
        store.fit_bounds(Bounds::from_point(1.0, 2.0), FitOptions::default());

        let base = json!({
            "version": 8,
            "sources": { "terrainSource": { "type": "raster-dem" } },
            "layers": [{ "id": "background", "type": "background" }]
        });
        let doc = store.to_style_document(&base, Some(55.0), None);

        assert_eq!(doc["sources"]["terrainSource"]["type"], "raster-dem");
        assert_eq!(doc["sources"]["points"]["type"], "geojson");
        assert_eq!(doc["layers"][0]["id"], "background");
        assert_eq!(doc["layers"][1]["id"], "main");
        assert_eq!(doc["sky"]["sky-color"], "#000");
        assert_eq!(doc["pitch"], 55.0);
        assert!(doc.get("bearing").is_none());
        assert!(doc.get("terrain").is_none());
        assert!(store.camera().is_some());
    }

    #[test]
    fn non_object_base_starts_empty() {
        let doc = store().to_style_document(&Value::Null, None, None);
        assert_eq!(doc["version"], 8);
        assert_eq!(doc["layers"].as_array().map(Vec::len), Some(1));
    }
}
