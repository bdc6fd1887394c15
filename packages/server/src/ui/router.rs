//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_ai_toggle, get_messages, health_check, post_ai_message, post_ai_toggle, post_message,
        websocket_handler,
    },
    state::AppState,
};

/// Build the application router around the shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat/{chat_id}/message", post(post_message))
        .route("/api/chat/{chat_id}/message/ai", post(post_ai_message))
        .route("/api/chat/{chat_id}/messages", get(get_messages))
        .route(
            "/api/admin/ai-toggle",
            get(get_ai_toggle).post(post_ai_toggle),
        )
        .route("/ws", any(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
