//! Errors raised while starting or running the server.

use thiserror::Error;

use crate::domain::AiResponderError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop stopped with an I/O error
    #[error("Server failed: {0}")]
    Serve(#[source] std::io::Error),

    /// The AI responder could not be constructed
    #[error("Failed to set up AI responder: {0}")]
    AiResponder(#[from] AiResponderError),
}
