use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{file::item_store::FileItemStore, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Read config.toml (or the environment when it is absent) and validate.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining in-flight requests"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl+C; shutting down"),
    }
}

/// Serve `app` until `signal` resolves, then stop accepting and wait for
/// in-flight requests to finish.
pub async fn serve_until<F>(listener: TcpListener, app: Router, signal: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(signal).await
}

/// Public entry: build the app from `cfg` and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.data_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    // Path is injected here; the store never looks at a global location.
    let store = FileItemStore::new(&cfg.storage.data_file);
    let state = ServerState::new(store);

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}: {e}", cfg.bind_addr())))?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "starting item service");
    let listener = TcpListener::bind(addr).await?;
    serve_until(listener, app, shutdown_signal()).await?;
    info!("item service stopped");
    Ok(())
}
