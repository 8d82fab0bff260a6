use anyhow::Context;
use book_gateway_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load gateway settings")?;

    book_gateway_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        upstream = %settings.book_service.endpoint(),
        "book-gateway bootstrap starting"
    );

    book_gateway::run(settings).await
}
