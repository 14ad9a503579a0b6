#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the landslide incident map.
//!
//! Loads the incident collection and base style once at startup, composes
//! the map in memory, and serves the merged `MapLibre` style document,
//! the legend, popup and help endpoints, the data directory and the
//! built frontend.

pub mod config;
mod handlers;
pub mod interactive;
pub mod loader;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use geojson::FeatureCollection;
use landslide_map_map::MapError;
use landslide_map_map::engine::StyleStore;
use landslide_map_map::toggle::{LandslideMap, MapOptions};
use serde_json::Value;

pub use config::ServerConfig;
pub use loader::LoadError;

/// Shared application state.
pub struct AppState {
    /// The composed map, fixed at the initial metric. Requests that
    /// switch metrics work on their own copy.
    pub map: LandslideMap<StyleStore>,
    /// Base style the map's sources and layers are merged into.
    pub base_style: Value,
}

impl AppState {
    /// Composes the map over `incidents`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the map cannot be composed.
    pub fn new(
        incidents: &FeatureCollection,
        base_style: Value,
        options: &MapOptions,
    ) -> Result<Self, MapError> {
        let map = LandslideMap::new(StyleStore::new(), incidents, options)?;
        Ok(Self {
            map,
            base_style,
        })
    }
}

/// Loads both startup documents in turn and composes the map.
///
/// # Errors
///
/// Returns [`LoadError`] on the first document that fails to load, or if
/// the map cannot be composed.
pub async fn load_state(config: &ServerConfig) -> Result<AppState, LoadError> {
    log::info!("Loading incidents from {}...", config.incidents);
    let incidents = loader::load_incidents(&config.incidents).await?;

    log::info!("Loading base style from {}...", config.style);
    let base_style = loader::load_style(&config.style).await?;

    Ok(AppState::new(&incidents, base_style, &MapOptions::default())?)
}

/// Registers the style document and `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/style.json", web::get().to(handlers::style_document))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/legend", web::get().to(handlers::legend))
                .route("/legend/html", web::get().to(handlers::legend_html))
                .route("/metric", web::get().to(handlers::get_metric))
                .route("/metric", web::post().to(handlers::switch_metric))
                .route("/popup", web::post().to(handlers::popup))
                .route("/camera", web::get().to(handlers::camera))
                .route("/help", web::get().to(handlers::help)),
        );
}

/// Starts the landslide map server.
///
/// Loads the startup documents, composes the map and starts the
/// Actix-Web HTTP server. The caller is responsible for providing the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if loading fails, or if the HTTP
/// server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(load_state(&config).await.map_err(|e| {
        log::error!("Startup failed: {e}");
        std::io::Error::other(e)
    })?);

    let data_dir = config.data_dir.clone();
    let app_dir = config.app_dir.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            // Label and incident data
            .service(Files::new("/data", data_dir.clone()))
            // Frontend static files
            .service(Files::new("/", app_dir.clone()).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
