//! Server assembly.
//!
//! The generated `LogServiceServer` is registered on a `tonic::service::Routes`
//! (routed by `NamedService::NAME`) and turned into an axum router, which is
//! then served with `axum::serve`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vlog_mock::prelude::*;
//!
//! # async fn run() -> std::io::Result<()> {
//! let registry = Arc::new(OutcomeRegistry::new());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5001").await?;
//! serve(listener, registry, std::future::pending()).await
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tonic::service::Routes;

use crate::handler::MockLogService;
use crate::proto::log_service_server::LogServiceServer;
use crate::registry::OutcomeRegistry;

/// Build the axum router exposing `vehicle_logs.LogService` over `registry`.
pub fn router(registry: Arc<OutcomeRegistry>) -> Router {
    Routes::default()
        .add_service(LogServiceServer::new(MockLogService::new(registry)))
        .prepare()
        .into_axum_router()
}

/// Serve the mock on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    registry: Arc<OutcomeRegistry>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "vehicle log mock listening");

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown)
        .await
}
