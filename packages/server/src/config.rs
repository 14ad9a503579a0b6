//! Server configuration from environment variables.

use std::path::PathBuf;

/// Interface to bind.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Port to listen on.
pub const PORT_VAR: &str = "PORT";
/// Directory served under `/data`.
pub const DATA_DIR_VAR: &str = "LANDSLIDE_DATA_DIR";
/// Incident `GeoJSON`, a path or an `http(s)` URL.
pub const INCIDENTS_VAR: &str = "LANDSLIDE_INCIDENTS";
/// Base `MapLibre` style document, a path or an `http(s)` URL.
pub const STYLE_VAR: &str = "LANDSLIDE_STYLE";
/// Built frontend served at `/`.
pub const APP_DIR_VAR: &str = "LANDSLIDE_APP_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_INCIDENTS_FILE: &str = "landslides.geojson";
const DEFAULT_STYLE: &str = "style.json";
const DEFAULT_APP_DIR: &str = "app/dist";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub incidents: String,
    pub style: String,
    pub app_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    /// Reads every setting from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`, falling back to defaults.
    ///
    /// The incidents location defaults to `landslides.geojson` inside the
    /// data directory. An unparseable port falls back to 8080.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(PORT_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                log::warn!("Invalid {PORT_VAR} '{raw}' ({e}), using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let data_dir = PathBuf::from(get(DATA_DIR_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let incidents = get(INCIDENTS_VAR).unwrap_or_else(|| {
            data_dir
                .join(DEFAULT_INCIDENTS_FILE)
                .to_string_lossy()
                .into_owned()
        });

        Self {
            bind_addr: get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            incidents,
            style: get(STYLE_VAR).unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            app_dir: PathBuf::from(get(APP_DIR_VAR).unwrap_or_else(|| DEFAULT_APP_DIR.to_string())),
            data_dir,
        }
    }
}
