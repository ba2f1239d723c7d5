// src/cli/serve.rs
// Web form server startup and shutdown

use super::{Cli, build_client};
use anyhow::Result;
use llm_expert::web::{self, state::AppState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub async fn run_server(cli: &Cli) -> Result<()> {
    // Refuse to bind anything until the credential and settings check out
    let client = build_client(cli)?;
    let server = cli.server.to_settings();

    let shutdown = CancellationToken::new();
    let state = AppState::with_shutdown(Arc::new(client), shutdown.clone());
    let app = web::create_router(state);

    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("LLM Expert Web App running on http://{}", addr);
    println!("LLM Expert Web App running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl-C, then cancel in-flight model calls
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Keep serving rather than exiting immediately
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, cancelling in-flight requests");
    shutdown.cancel();
}
