use std::future::IntoFuture;
use std::path::PathBuf;

use async_trait::async_trait;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::debug;

/// Everything the backend needs to bring up a listener.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
}

/// Handle to a single running preview server. Closing consumes the handle;
/// there is no way to hold onto a closed server.
#[async_trait]
pub trait ServerHandle: Send {
    fn port(&self) -> u16;
    async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

/// Boundary to the serving machinery, injected into the lifecycle manager.
#[async_trait]
pub trait ServeBackend: Send + Sync {
    async fn create(&self, config: &ServeConfig) -> anyhow::Result<Box<dyn ServerHandle>>;
}

/// Serves the workspace's generated `public/` tree.
#[derive(Debug, Default)]
pub struct StaticSiteBackend;

struct AxumHandle {
    port: u16,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<std::io::Result<()>>,
}

#[async_trait]
impl ServeBackend for StaticSiteBackend {
    async fn create(&self, config: &ServeConfig) -> anyhow::Result<Box<dyn ServerHandle>> {
        let app = Router::new()
            .fallback_service(ServeDir::new(&config.public_dir))
            .layer(CorsLayer::permissive());

        let addr = format!("{}:{}", config.host, config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(
            axum::serve(listener, app)
                .with_graceful_shutdown(cancel.clone().cancelled_owned())
                .into_future(),
        );
        debug!(%addr, "preview listener bound");

        Ok(Box::new(AxumHandle { port, cancel, task }))
    }
}

#[async_trait]
impl ServerHandle for AxumHandle {
    fn port(&self) -> u16 {
        self.port
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.cancel.cancel();
        self.task.await??;
        Ok(())
    }
}
