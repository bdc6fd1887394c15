//! Room-based chat relay.
//!
//! Clients post messages to named rooms over HTTP, subscribers receive them in
//! real time over WebSocket, and an external AI service can be asked to reply
//! into a room as the `"ai"` participant.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::run as run_server;
pub use ui::{AppState, build_router};
