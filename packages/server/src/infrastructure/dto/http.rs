//! HTTP API request / response DTOs for the chat relay.

use roomrelay_shared::time::millis_to_rfc3339;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ChatMessage, MessageKind};

/// Body of `POST /api/chat/{chatId}/message`.
///
/// Fields are untyped on purpose: whatever arrives is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub sender: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl SubmitMessageRequest {
    /// Parse a raw request body, treating anything unparseable as an empty body.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        (
            self.sender.and_then(value_to_text),
            self.message.and_then(value_to_text),
        )
    }
}

/// Body of `POST /api/chat/{chatId}/message/ai`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAiRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl SubmitAiRequest {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Question text forwarded to the AI backend (empty when missing)
    pub fn into_text(self) -> String {
        self.message.and_then(value_to_text).unwrap_or_default()
    }
}

/// Strings are kept as-is, `null` means missing, other JSON values keep their JSON text.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Stored message as sent to HTTP clients and WebSocket subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<String>,
    pub message: Option<String>,
    pub created_at: String, // ISO 8601
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            chat_id: message.chat_id.as_str().to_string(),
            sender: message.sender.clone(),
            message: message.message.clone(),
            created_at: millis_to_rfc3339(message.created_at.value()),
            kind: message.kind.map(|kind| match kind {
                MessageKind::Ai => "ai".to_string(),
            }),
        }
    }
}

/// Body of `GET/POST /api/admin/ai-toggle` responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiToggleDto {
    pub enabled: bool,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub rooms: usize,
    pub connections: usize,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
