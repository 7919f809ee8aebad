use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::items::{InMemoryItemStore, ItemStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(config: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = config.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Router over a fresh, empty item store.
pub fn build_app() -> Router {
    let store: Arc<dyn ItemStore> = InMemoryItemStore::new();
    routes::build_router(store, build_cors())
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(%addr, "server stopped");
    Ok(())
}

/// Bind from config and serve a fresh store until `shutdown` resolves.
pub async fn run_with_shutdown<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&config)?;
    info!(%addr, "starting server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, build_app(), shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_from_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap(), "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
    }
}
