//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{ChatId, MessageId, Timestamp};

/// Sender name reserved for messages produced by the AI responder
pub const AI_SENDER: &str = "ai";

/// Origin marker of a stored message.
///
/// Human messages carry no marker at all; only AI replies are tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Ai,
}

/// A message intent before it is appended to a room.
///
/// `sender` and `message` are optional on purpose: whatever arrives is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub sender: Option<String>,
    pub message: Option<String>,
    pub kind: Option<MessageKind>,
}

impl MessageDraft {
    /// Draft for a message posted by a human participant
    pub fn human(sender: Option<String>, message: Option<String>) -> Self {
        Self {
            sender,
            message,
            kind: None,
        }
    }

    /// Draft for a reply produced by the AI responder
    pub fn ai(answer: String) -> Self {
        Self {
            sender: Some(AI_SENDER.to_string()),
            message: Some(answer),
            kind: Some(MessageKind::Ai),
        }
    }
}

/// A message stored in a room. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server-assigned identifier
    pub id: MessageId,
    /// Room the message belongs to
    pub chat_id: ChatId,
    /// Sender name, `"ai"` for AI replies
    pub sender: Option<String>,
    /// Text payload
    pub message: Option<String>,
    /// Assigned at append time, non-decreasing within a room
    pub created_at: Timestamp,
    /// `Some(MessageKind::Ai)` for AI replies
    pub kind: Option<MessageKind>,
}

impl ChatMessage {
    pub fn is_ai(&self) -> bool {
        self.kind == Some(MessageKind::Ai)
    }
}

/// Represents a chat room and its append-only message history
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identifier
    pub id: ChatId,
    /// Message history in append order
    pub messages: Vec<ChatMessage>,
}

impl Room {
    /// Create a new empty room with the given ID
    pub fn new(id: ChatId) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    /// Append a message to the room history and return the stored copy.
    ///
    /// `created_at` never goes below the previous message's, even if the
    /// wall clock moved backwards.
    pub fn append(&mut self, id: MessageId, draft: MessageDraft, now: Timestamp) -> ChatMessage {
        let created_at = match self.messages.last() {
            Some(last) => now.max(last.created_at),
            None => now,
        };

        let message = ChatMessage {
            id,
            chat_id: self.id.clone(),
            sender: draft.sender,
            message: draft.message,
            created_at,
            kind: draft.kind,
        };
        self.messages.push(message.clone());
        message
    }
}

/// Event pushed into a connection's outbound queue by the Subscription Registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// A message was appended to a room the connection has joined
    NewMessage(ChatMessage),
    /// Acknowledges a join request
    Joined(ChatId),
    /// Acknowledges a leave request
    Left(ChatId),
}
