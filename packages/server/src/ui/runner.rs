//! Server bootstrap.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{config::ServerConfig, error::ServerError};

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Bind the configured address and serve until a shutdown signal arrives
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!("Listening on http://{}", local_addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
