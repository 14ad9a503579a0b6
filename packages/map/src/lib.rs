#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map composition for the landslide map.
//!
//! Rendering belongs to `MapLibre` in the browser. This crate owns
//! everything around it: the [`engine::MapEngine`] seam through which
//! sources and layers are registered and queried, an in-memory
//! implementation that serializes to a style document, camera fitting
//! over the incident extent, the [`toggle::LandslideMap`] state object
//! that switches metrics, and the first-run [`help`] overlay.

pub mod bounds;
pub mod engine;
pub mod help;
pub mod toggle;

use thiserror::Error;

/// Errors that can occur while composing the map.
#[derive(Debug, Error)]
pub enum MapError {
    /// A source with this id is already registered.
    #[error("Source '{0}' already exists")]
    DuplicateSource(String),

    /// A layer with this id is already registered.
    #[error("Layer '{0}' already exists")]
    DuplicateLayer(String),

    /// A layer references a source that was never added.
    #[error("Layer '{layer}' references missing source '{source_id}'")]
    MissingSource {
        /// Layer being added.
        layer: String,
        /// Source it references.
        source_id: String,
    },

    /// No layer with this id exists.
    #[error("Unknown layer '{0}'")]
    UnknownLayer(String),

    /// A layer definition is not a JSON object with a string `id`.
    #[error("Invalid layer: {message}")]
    InvalidLayer {
        /// Description of what went wrong.
        message: String,
    },

    /// The incident collection could not be serialized into a source.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
