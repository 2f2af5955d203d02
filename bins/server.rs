use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};
use uuid::Uuid;

fn build_runtime(cfg: &AppConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads.filter(|w| *w > 0) {
        builder.worker_threads(w);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG / LOG_FORMAT apply
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(%instance, message = %info, "panic in item service");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "refusing to start with invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "item service starting"
    );

    // run() drains in-flight requests after Ctrl+C before returning
    match rt.block_on(server::run(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "item service exited with error");
            ExitCode::FAILURE
        }
    }
}
