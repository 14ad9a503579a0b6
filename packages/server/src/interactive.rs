//! Interactive mode for the server.
//!
//! Prompts the user for the bind address, port and startup documents
//! before starting the server.

use std::collections::BTreeMap;

use dialoguer::{Confirm, Input};

use crate::config::{BIND_ADDR_VAR, INCIDENTS_VAR, PORT_VAR, STYLE_VAR, ServerConfig};

fn prompt(label: &str, default: &str) -> String {
    Input::new()
        .with_prompt(label)
        .default(default.to_string())
        .interact_text()
        .unwrap_or_else(|_| default.to_string())
}

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults come from the environment. Answers override them for this
/// run only, then [`super::run_server`] takes over.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Landslide Map Server");
    println!();

    let defaults = ServerConfig::from_env();

    let mut answers = BTreeMap::new();
    answers.insert(BIND_ADDR_VAR, prompt("Bind address", &defaults.bind_addr));
    answers.insert(PORT_VAR, prompt("Port", &defaults.port.to_string()));
    answers.insert(INCIDENTS_VAR, prompt("Incident GeoJSON (path or URL)", &defaults.incidents));
    answers.insert(STYLE_VAR, prompt("Base style (path or URL)", &defaults.style));

    let config = ServerConfig::from_lookup(|key| {
        answers
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    });

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{}?",
            config.bind_addr, config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
