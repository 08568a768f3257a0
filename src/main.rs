//! lexos - Reading difficulty lookup service
//!
//! Drives one shared headless Chromium against the Lexile hub and AR
//! BookFind, and streams the merged scores for an ISBN back over a
//! WebSocket. The browser engine launches once at startup; failure to
//! launch is fatal.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lexos::browser::BrowserPool;
use lexos::config::Config;
use lexos::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting lexos (reading-difficulty lookup) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Configuration: LEXOS_CONFIG / ./lexos.toml / compiled defaults
    let config = Config::load()?;

    // Launch the shared browser engine; without it there is no service
    let pool = BrowserPool::launch().await?;

    let state = AppState::new(Arc::new(pool), Arc::new(config.clone()));
    let app = lexos::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Lookup page: http://{}/", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests are done; close the engine before exiting
    state.pool.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
