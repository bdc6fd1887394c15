//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ChatId validation error
    #[error("ChatId cannot be empty")]
    ChatIdEmpty,

    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,
}

/// Errors returned by the Room Store and Subscription Registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The connection was never registered or has already disconnected
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),
}

/// Errors returned by an AI responder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiResponderError {
    /// The request did not complete within the configured timeout
    #[error("AI backend timed out after {0} ms")]
    Timeout(u64),

    /// Connection or transport failure
    #[error("AI backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status code
    #[error("AI backend returned status {0}")]
    Status(u16),

    /// The response body was not a JSON document
    #[error("AI backend returned an unparseable body: {0}")]
    InvalidBody(String),
}

/// Errors related to the Admin Gate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminGateError {
    /// The toggle value was not a boolean
    #[error("Invalid toggle state: {0}")]
    InvalidArgument(String),
}
