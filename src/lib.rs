//! Book gateway application library
//!
//! REST/JSON endpoints for books, each forwarded as one call to the upstream
//! Book gRPC service.

pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use book_gateway_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use book_gateway_upstream::GrpcBookService;

/// Connect upstream, serve until SIGINT/SIGTERM, then stop modules.
///
/// Fails before binding the listener when the Book service is unreachable.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let book_service = GrpcBookService::connect(&settings.book_service)
        .await
        .with_context(|| "book service is unavailable, refusing to serve traffic")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, Arc::new(book_service), &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    book_gateway_http::start_server(&registry, &settings, book_gateway_http::shutdown_signal())
        .await?;

    registry.stop_all().await?;
    tracing::info!("book-gateway exiting");
    Ok(())
}
