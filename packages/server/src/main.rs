#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landslide map server binary.
//!
//! ```text
//! landslide_map_server [--port 9000] [--incidents data/landslides.geojson]
//! landslide_map_server --interactive
//! ```
//!
//! Flags override the matching environment variables.

use std::path::PathBuf;

use clap::Parser;
use landslide_map_server::ServerConfig;
use landslide_map_server::config::{
    APP_DIR_VAR, BIND_ADDR_VAR, DATA_DIR_VAR, INCIDENTS_VAR, PORT_VAR, STYLE_VAR,
};

#[derive(Parser)]
#[command(
    name = "landslide_map_server",
    about = "Serve the landslide incident map"
)]
struct Cli {
    /// Prompt for settings before starting
    #[arg(long)]
    interactive: bool,
    /// Interface to bind
    #[arg(long)]
    bind_addr: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
    /// Directory served under /data
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Incident GeoJSON path or URL
    #[arg(long)]
    incidents: Option<String>,
    /// Base style document path or URL
    #[arg(long)]
    style: Option<String>,
    /// Built frontend directory
    #[arg(long)]
    app_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Vec<(&'static str, String)> {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().into_owned());
        [
            (BIND_ADDR_VAR, self.bind_addr.clone()),
            (PORT_VAR, self.port.map(|p| p.to_string())),
            (DATA_DIR_VAR, path(&self.data_dir)),
            (INCIDENTS_VAR, self.incidents.clone()),
            (STYLE_VAR, self.style.clone()),
            (APP_DIR_VAR, path(&self.app_dir)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if cli.interactive {
        return landslide_map_server::interactive::run().await;
    }

    let overrides = cli.overrides();
    let config = ServerConfig::from_lookup(|key| {
        overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .or_else(|| std::env::var(key).ok())
    });

    landslide_map_server::run_server(config).await
}
