//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod admin_gate;
pub mod ai_responder;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use admin_gate::AdminGate;
pub use ai_responder::AiResponder;
pub use entity::{AI_SENDER, ChatMessage, MessageDraft, MessageKind, Room, RoomEvent};
pub use error::{AdminGateError, AiResponderError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use repository::{RoomRepository, SubscriptionRegistry};
pub use value_object::{ChatId, ConnectionId, MessageId, Timestamp};
