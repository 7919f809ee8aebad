use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "inventory", event = "logger_init", "tracing subscriber initialized");
}

async fn shutdown_signal(service_id: Uuid, pid: u32) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = "inventory", event = "signal_error", error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "inventory", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "inventory",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let config = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "inventory", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = config.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "inventory", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "inventory",
        event = "start",
        %service_id,
        pid,
        version,
        threads = config.server.worker_threads.unwrap_or_default(),
        "inventory service starting"
    );

    rt.block_on(async move {
        match server::run_with_shutdown(config, shutdown_signal(service_id, pid)).await {
            Ok(()) => {
                info!(service = "inventory", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "inventory", event = "run_failed", error = %e, "server returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
