pub mod model;
pub mod resolve;
pub mod validate;
pub mod watcher;

use std::path::Path;

use model::BlogrigConfig;

/// Load and parse a config file, returning the parsed config together with
/// the raw source text (kept for span-based validation diagnostics).
pub fn load_config(path: &Path) -> anyhow::Result<(BlogrigConfig, String)> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
    let config: BlogrigConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
    Ok((config, content))
}

/// Read the raw (unparsed) text of the `preview.port` entry, if present.
///
/// Used by the serve loop when the config file changes on disk: the candidate
/// value is handed to the port validator as raw text so that non-numeric
/// edits surface as validation errors instead of a parse failure that would
/// discard the whole config.
pub fn raw_preview_port(content: &str) -> Option<String> {
    let value: toml::Value = content.parse().ok()?;
    let port = value.get("preview")?.get("port")?;
    Some(match port {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
