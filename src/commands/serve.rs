use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config;
use crate::config::model::BlogrigConfig;
use crate::config::resolve::resolve_config;
use crate::config::validate::validate;
use crate::config::watcher::{ConfigEvent, ConfigWatcher};
use crate::preview::ports::{probe_port, BindProber};
use crate::preview::server::{ServeConfig, StaticSiteBackend};
use crate::preview::state::FileSessionStore;
use crate::preview::validator::{PortValidator, ValidationOutcome};
use crate::preview::PreviewManager;
use crate::site::SiteWorkspace;
use crate::ui::messages::{port_error_text, Lang};
use crate::ui::notify::{ConsoleStatus, StatusSink};
use crate::ui::summary::print_serve_summary;

pub async fn run(config_file: Option<PathBuf>, port_override: Option<u16>) -> Result<()> {
    let config_path = resolve_config(config_file.as_deref())?;
    let (mut config, source) = config::load_config(&config_path)?;
    if let Some(port) = port_override {
        config.preview.port = port;
    }

    let workspace_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let workspace = SiteWorkspace::open(&workspace_dir, config.site.clone())?;

    check_config(&config, &source, &config_path, &workspace)?;

    let public_dir = workspace.public_dir();
    if !public_dir.is_dir() {
        bail!(
            "nothing to serve: {} does not exist (generate the site first)",
            public_dir.display()
        );
    }

    let lang = Lang::from_tag(&config.preview.lang);
    let status: Arc<dyn StatusSink> = Arc::new(ConsoleStatus::new(lang));
    let store = Arc::new(FileSessionStore::new(&workspace_dir));
    let mut manager = PreviewManager::new(
        Arc::new(StaticSiteBackend),
        status.clone(),
        store,
        config_path.clone(),
    );

    // Same gate the settings form applies: an occupied port blocks startup
    // outright instead of failing halfway through.
    if !probe_port(config.preview.port).await {
        bail!(
            "port {} is already in use (change [preview].port in {})",
            config.preview.port,
            config_path.display()
        );
    }

    let mut serve_config = ServeConfig {
        host: config.preview.host.clone(),
        port: config.preview.port,
        public_dir,
    };
    manager.start(&serve_config).await?;
    if !manager.is_running() {
        bail!("preview server failed to start");
    }
    let mut current_port = serve_config.port;

    print_serve_summary(
        &config.site.title,
        &workspace.local_url(current_port),
        manager.phase(),
    );

    // Config edits flow through the debounced switch-latest validator; only
    // the newest candidate port ever reaches the restart logic below.
    let (candidate_tx, candidate_rx) = mpsc::channel(16);
    let (outcome_tx, mut outcome_rx) = mpsc::channel(16);
    tokio::spawn(PortValidator::new(Arc::new(BindProber)).run(candidate_rx, outcome_tx));

    let (mut config_events, _watch_guard) = ConfigWatcher::new(&config_path)
        .watch()
        .context("starting config watcher")?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            Some(ConfigEvent::Changed) = config_events.recv() => {
                match std::fs::read_to_string(&config_path) {
                    Ok(content) => {
                        if let Some(raw) = config::raw_preview_port(&content) {
                            let _ = candidate_tx.send(raw).await;
                        }
                    }
                    Err(err) => warn!("config reread failed: {}", err),
                }
            }
            Some(outcome) = outcome_rx.recv() => match outcome {
                ValidationOutcome::Pending => {}
                ValidationOutcome::Valid(port) => {
                    if port == current_port && manager.is_running() {
                        continue;
                    }
                    info!(from = current_port, to = port, "preview port changed; restarting");
                    manager.stop().await;
                    serve_config.port = port;
                    manager.start(&serve_config).await?;
                    if manager.is_running() {
                        current_port = port;
                        println!("  Now serving at {}", workspace.local_url(current_port));
                    } else {
                        warn!(port, "restart failed; edit the config to try another port");
                    }
                }
                ValidationOutcome::Invalid(err) => {
                    status.error(&anyhow::anyhow!("{}", port_error_text(&err, lang)));
                }
            },
        }
    }

    manager.stop().await;
    Ok(())
}

fn check_config(
    config: &BlogrigConfig,
    source: &str,
    config_path: &Path,
    workspace: &SiteWorkspace,
) -> Result<()> {
    let filename = config_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "blogrig.toml".to_string());
    let layouts = workspace.layouts().ok();

    if let Err(errors) = validate(config, source, &filename, layouts.as_deref()) {
        let mut msg = String::from("Configuration errors:\n");
        for err in &errors {
            msg.push_str(&format!("  - {}\n", err));
        }
        bail!("{}", msg.trim_end());
    }
    Ok(())
}
