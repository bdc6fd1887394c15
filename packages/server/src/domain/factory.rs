//! Domain factories for generating identifiers.

use super::{ConnectionId, MessageId};

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances.
///
/// Connections are anonymous, so the server names them when a socket is accepted.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
