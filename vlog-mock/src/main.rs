use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vlog_mock::config::ServerConfig;
use vlog_mock::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to listen on {}", config.addr))?;

    serve(listener, Arc::new(OutcomeRegistry::new()), shutdown_signal()).await?;

    tracing::info!("vehicle log mock stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl-C, shutting down"),
        Err(err) => {
            tracing::error!(error = %err, "unable to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
