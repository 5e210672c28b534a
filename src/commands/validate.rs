use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use crate::config;
use crate::config::resolve::resolve_config;
use crate::config::validate::validate;
use crate::preview::ports::probe_port;
use crate::site::SiteWorkspace;

pub async fn run(config_file: Option<&Path>) -> Result<()> {
    let config_path = resolve_config(config_file)?;
    let (config, source) = config::load_config(&config_path)?;

    let filename = config_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "blogrig.toml".to_string());

    let root = config_path.parent().unwrap_or_else(|| Path::new("."));
    let layouts = SiteWorkspace::open(root, config.site.clone())
        .ok()
        .and_then(|ws| ws.layouts().ok());

    match validate(&config, &source, &filename, layouts.as_deref()) {
        Ok(()) => {
            println!(
                "  {} {} is valid (site `{}`, preview port {})",
                "\u{2713}".green(),
                filename,
                config.site.title,
                config.preview.port,
            );
        }
        Err(errors) => {
            for err in errors {
                let report: miette::Report = err.into();
                eprintln!("{:?}", report);
            }
            std::process::exit(1);
        }
    }

    // Availability is advisory here: the port may free up before `serve`.
    if !probe_port(config.preview.port).await {
        println!(
            "  {} port {} is currently in use; `blogrig serve` will refuse to start",
            "!".yellow(),
            config.preview.port
        );
    }

    Ok(())
}
