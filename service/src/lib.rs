mod error;
mod logging;
mod service;

use std::future::Future;

use abi::Config;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use reservation::ReservationManager;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use logging::init_tracing;

#[derive(Debug, Clone)]
pub struct RsvpService {
    manager: ReservationManager,
}

impl RsvpService {
    pub fn new(manager: ReservationManager) -> Self {
        Self { manager }
    }

    pub async fn from_config(config: &Config) -> Result<Self, abi::Error> {
        Ok(Self::new(ReservationManager::from_config(config).await?))
    }
}

pub fn build_router(svc: RsvpService) -> Router {
    Router::new()
        .route("/api/parking/reserve", post(service::reserve))
        .route("/api/parking/reservation", get(service::lookup))
        .route("/api/parking/parked-vehicles", get(service::list))
        .route("/api/parking/modify", put(service::modify))
        .route("/api/parking/cancel", delete(service::cancel))
        .layer(middleware::from_fn(logging::access_log))
        .with_state(svc)
}

pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let svc = RsvpService::from_config(config).await?;
    let listener = TcpListener::bind(config.server.addr()).await?;
    serve(listener, svc, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then close the store.
pub async fn serve<F>(listener: TcpListener, svc: RsvpService, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("parking service listening on {}", listener.local_addr()?);
    let manager = svc.manager.clone();
    axum::serve(listener, build_router(svc))
        .with_graceful_shutdown(shutdown)
        .await?;
    manager.close().await;
    info!("parking service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
