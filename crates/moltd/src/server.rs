//! HTTP server for moltd.

use crate::config::ServerConfig;
use crate::routes;
use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared across handlers. Read-only for the server's lifetime,
/// which keeps every handler safe under arbitrary concurrency.
pub struct AppState {
    pub config: ServerConfig,
}

/// Run the HTTP server until the process is stopped.
pub async fn run(config: ServerConfig) -> Result<()> {
    let listen = config.listen;
    let state = Arc::new(AppState { config });

    let app = routes::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
