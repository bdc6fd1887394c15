//! WebSocket message DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::domain::RoomEvent;

use super::http::ChatMessageDto;

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Subscribe to a room's `new_message` events
    JoinChat { chat_id: String },
    /// Unsubscribe from a room
    LeaveChat { chat_id: String },
}

/// Frames sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    ChatJoined { chat_id: String },
    ChatLeft { chat_id: String },
    NewMessage { message: ChatMessageDto },
    Error { reason: String },
}

impl From<&RoomEvent> for ServerFrame {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::NewMessage(message) => ServerFrame::NewMessage {
                message: ChatMessageDto::from(message),
            },
            RoomEvent::Joined(chat_id) => ServerFrame::ChatJoined {
                chat_id: chat_id.as_str().to_string(),
            },
            RoomEvent::Left(chat_id) => ServerFrame::ChatLeft {
                chat_id: chat_id.as_str().to_string(),
            },
        }
    }
}
