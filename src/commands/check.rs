use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::config;
use crate::config::resolve::resolve_config;
use crate::preview::ports::probe_port;

/// One-shot availability probe. Exits non-zero (via the error path) when the
/// port is taken, so scripts can gate on it.
pub async fn run(config_file: Option<&Path>, port: Option<u16>) -> Result<()> {
    let port = match port {
        Some(port) => port,
        None => {
            let config_path = resolve_config(config_file)?;
            let (config, _source) = config::load_config(&config_path)?;
            config.preview.port
        }
    };

    if probe_port(port).await {
        println!("  {} port {} is free", "\u{2713}".green(), port);
        Ok(())
    } else {
        bail!("port {} is already in use", port);
    }
}
