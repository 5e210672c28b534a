use anyhow::Result;
use std::path::Path;

use crate::config;
use crate::config::resolve::resolve_config;
use crate::site::SiteWorkspace;

fn open_workspace(config_file: Option<&Path>) -> Result<(SiteWorkspace, String)> {
    let config_path = resolve_config(config_file)?;
    let (config, _source) = config::load_config(&config_path)?;
    let root = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let default_layout = config.preview.default_layout.clone();
    let workspace = SiteWorkspace::open(&root, config.site)?;
    Ok((workspace, default_layout))
}

pub fn run_new(config_file: Option<&Path>, title: &str, layout: Option<&str>) -> Result<()> {
    let (workspace, default_layout) = open_workspace(config_file)?;
    let layout = layout.unwrap_or(&default_layout);
    let post = workspace.create_post(title, layout)?;
    println!("Created {}", post.path.display());
    Ok(())
}

pub fn run_publish(config_file: Option<&Path>, slug: &str, layout: Option<&str>) -> Result<()> {
    let (workspace, _) = open_workspace(config_file)?;
    let post = workspace.publish_draft(slug, layout)?;
    println!("Published {}", post.path.display());
    Ok(())
}
