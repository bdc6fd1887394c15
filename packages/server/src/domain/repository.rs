//! Repository trait 定義
//!
//! ドメイン層はストレージの抽象だけを定義し、実装はインフラ層に置きます（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::{ChatMessage, MessageDraft, RoomEvent},
    error::RepositoryError,
    value_object::{ChatId, ConnectionId, Timestamp},
};

/// Room Store: ルームごとの追記専用メッセージ履歴
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームが無ければ作成し、メッセージを末尾に追加して保存済みの値を返す
    async fn append(&self, chat_id: &ChatId, draft: MessageDraft, now: Timestamp) -> ChatMessage;

    /// ルームの履歴のスナップショットを返す（未知のルームは空）
    async fn history(&self, chat_id: &ChatId) -> Vec<ChatMessage>;

    /// これまでに作成されたルーム数
    async fn count_rooms(&self) -> usize;
}

/// Subscription Registry: 接続とルームの購読関係、および接続ごとの送信キュー
#[async_trait]
pub trait SubscriptionRegistry: Send + Sync {
    /// 接続と送信キューを登録する
    async fn register(&self, connection_id: ConnectionId, outbound: UnboundedSender<RoomEvent>);

    /// ルームに参加する（冪等）。新規の購読なら true
    async fn join(
        &self,
        connection_id: &ConnectionId,
        chat_id: ChatId,
    ) -> Result<bool, RepositoryError>;

    /// ルームから退出する（冪等）。購読していたなら true
    async fn leave(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, RepositoryError>;

    /// ルームの購読者一覧
    async fn members_of(&self, chat_id: &ChatId) -> Vec<ConnectionId>;

    /// 接続を削除し、参加していたルーム一覧を返す
    async fn on_disconnect(&self, connection_id: &ConnectionId) -> Vec<ChatId>;

    /// ルームの全購読者の送信キューにイベントを積み、届いた件数を返す
    async fn publish(&self, chat_id: &ChatId, event: RoomEvent) -> usize;

    /// 単一の接続にだけイベントを送る
    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: RoomEvent,
    ) -> Result<(), RepositoryError>;

    /// 接続中のクライアント数
    async fn count_connections(&self) -> usize;
}
