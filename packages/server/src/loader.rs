//! Startup loading of the incident collection and the base style.

use geojson::FeatureCollection;
use landslide_map_map::MapError;
use serde_json::Value;
use thiserror::Error;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A document is not valid JSON, or not the expected JSON shape.
    #[error("Failed to parse {location}: {source}")]
    Json {
        /// Path or URL of the document.
        location: String,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A document parsed but cannot be used.
    #[error("Invalid document at {location}: {message}")]
    Invalid {
        /// Path or URL of the document.
        location: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The map could not be composed from the loaded documents.
    #[error("Failed to compose map: {0}")]
    Map(#[from] MapError),
}

/// Whether `location` should be fetched over HTTP rather than read from
/// disk.
#[must_use]
pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads a JSON document from a path or URL.
///
/// # Errors
///
/// Returns [`LoadError`] if the document cannot be fetched or read, or is
/// not valid JSON.
pub async fn load_json(location: &str) -> Result<Value, LoadError> {
    if is_url(location) {
        log::debug!("Fetching {location}");
        let value = reqwest::get(location)
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        return Ok(value);
    }

    let bytes = tokio::fs::read(location)
        .await
        .map_err(|source| LoadError::Io {
            path: location.to_string(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
        location: location.to_string(),
        source,
    })
}

/// Loads the incident `FeatureCollection`.
///
/// # Errors
///
/// Returns [`LoadError`] if the document cannot be read or is not a
/// feature collection.
pub async fn load_incidents(location: &str) -> Result<FeatureCollection, LoadError> {
    let value = load_json(location).await?;
    let collection: FeatureCollection =
        serde_json::from_value(value).map_err(|source| LoadError::Json {
            location: location.to_string(),
            source,
        })?;
    log::info!(
        "Loaded {} incidents from {location}",
        collection.features.len()
    );
    Ok(collection)
}

/// Loads the base `MapLibre` style document.
///
/// # Errors
///
/// Returns [`LoadError`] if the document cannot be read or is not a JSON
/// object.
pub async fn load_style(location: &str) -> Result<Value, LoadError> {
    let value = load_json(location).await?;
    if !value.is_object() {
        return Err(LoadError::Invalid {
            location: location.to_string(),
            message: "style document must be a JSON object".to_string(),
        });
    }
    log::info!("Loaded base style from {location}");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "landslide_map_loader_{}_{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn detects_urls() {
        assert!(is_url("https://example.org/style.json"));
        assert!(is_url("http://localhost:3000/style.json"));
        assert!(!is_url("data/landslides.geojson"));
        assert!(!is_url("./https.json"));
    }

    #[tokio::test]
    async fn loads_incidents_from_disk() {
        let path = temp_file(
            "incidents.geojson",
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"County":"Pike"},"geometry":{"type":"Point","coordinates":[-82.5,37.4]}}]}"#,
        );
        let collection = load_incidents(path.to_str().unwrap()).await.unwrap();
        assert_eq!(collection.features.len(), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = load_json("/nonexistent/landslides.geojson").await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[tokio::test]
    async fn style_must_be_object() {
        let path = temp_file("style.json", "[1, 2, 3]");
        let err = load_style(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Invalid { .. }), "{err}");
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let path = temp_file("broken.geojson", "{ not json");
        let err = load_incidents(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }), "{err}");
        std::fs::remove_file(path).unwrap();
    }
}
