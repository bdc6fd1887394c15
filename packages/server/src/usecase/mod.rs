//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! ルームへの追記は全て `RoomRelay` を通り、ルームごとの順序が保証されます。

pub mod ai_toggle;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_history;
pub mod join_room;
pub mod relay;
pub mod request_ai_reply;
pub mod send_message;

pub use ai_toggle::AiToggleUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{AiToggleError, JoinRoomError, RequestAiReplyError};
pub use get_history::GetHistoryUseCase;
pub use join_room::{JoinRoomUseCase, LeaveRoomUseCase};
pub use relay::RoomRelay;
pub use request_ai_reply::RequestAiReplyUseCase;
pub use send_message::SendMessageUseCase;
