//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, service wiring, and Axum server lifecycle.

use crate::application::services::{CounterClient, MappingClient, ShortenerService};
use crate::config::Config;
use crate::infrastructure::stores::{self, Stores};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Wires the retrying clients and code generator over `stores`.
///
/// # Errors
///
/// Returns an error if the configured digest size is out of range.
pub fn build_service(config: &Config, stores: &Stores) -> Result<ShortenerService> {
    let retry = config.retry_policy();

    Ok(ShortenerService::new(
        CounterClient::new(stores.counter.clone(), retry),
        MappingClient::new(stores.mappings.clone(), retry),
        config.code_generator()?,
        config.collision_retries,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured backing store (PostgreSQL with migrations, Redis, or memory)
/// - The shortener service with its retry policy
/// - Axum HTTP server with trailing slash normalisation
///
/// # Errors
///
/// Returns an error if:
/// - Store connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = stores::connect(&config)
        .await
        .context("Failed to connect to backing store")?;
    tracing::info!("Store backend ready: {}", stores.backend);

    let shortener = build_service(&config, &stores)?;
    let state = AppState::new(Arc::new(shortener));

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
