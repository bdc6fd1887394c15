//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    get_ai_toggle, get_messages, health_check, post_ai_message, post_ai_toggle, post_message,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
