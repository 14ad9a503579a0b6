#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `MapLibre` layer definitions for the landslide map.
//!
//! The two metric layer pairs (primary circles plus a blurred shadow) are
//! described by TOML files embedded at compile time, following the same
//! registry pattern used for data sources. Label layers, sources and the
//! sky/terrain setup are fixed and built directly as style JSON.
//!
//! [`interpolate`] converts between the declarative `["interpolate", ...]`
//! expressions used for circle radii and ordered [`Stop`] lists.
//!
//! [`Stop`]: landslide_map_landslide_models::Stop

pub mod interpolate;
pub mod layers;
pub mod registry;

use thiserror::Error;

/// Errors that can occur while loading layer definitions.
#[derive(Debug, Error)]
pub enum StyleError {
    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A definition parsed but is not usable.
    #[error("Invalid layer definition: {message}")]
    InvalidLayer {
        /// Description of what went wrong.
        message: String,
    },
}
