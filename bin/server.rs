// Qatar Business & Life Hub - Web Server
// JSON API over the calculators, directory, document export and contact form

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use qatar_hub::api::{router, AppState};
use qatar_hub::{logging, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (falls back to defaults, rejects malformed values)
    let config = Config::from_env()?;
    logging::init(&config.rust_log);

    info!("Starting Qatar Hub API v{}", qatar_hub::VERSION);

    let addr = config.bind_addr;
    let app = router(AppState::new(config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("🚀 Listening on http://{addr}");
    info!("   API: http://{addr}/api/health");

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
