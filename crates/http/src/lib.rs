//! HTTP server facade for the book gateway: routing, envelope, error mapping.

use std::future::Future;

use anyhow::Context;
use axum::{routing::get, Router};

use book_gateway_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod response;
pub mod router;

pub use error::GatewayError;
pub use response::{Envelope, Payload};

use router::RouterBuilder;

/// Version prefix shared by all module routes
pub const API_PREFIX: &str = "/v1";

/// Serve until `shutdown` resolves, then drain in-flight requests
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    settings: &Settings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", addr);

    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to address {}", addr))?;

    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server drained");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .mount_modules(API_PREFIX, registry)
        .with_openapi(API_PREFIX, registry)
        .with_timeout(settings.server.request_timeout_ms)
        .with_tracing()
        .with_request_id()
        .with_cors()
        .build()
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
