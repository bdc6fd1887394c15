//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続の購読が残らないこと（以降の配信対象にならないこと）を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加中の接続の切断
//! - エッジケース：未登録・切断済みの接続の切断

use std::sync::Arc;

use crate::domain::{ChatId, ConnectionId, SubscriptionRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Subscription Registry
    registry: Arc<dyn SubscriptionRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn SubscriptionRegistry>) -> Self {
        Self { registry }
    }

    /// 切断を実行し、参加していたルームを返す
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<ChatId> {
        let rooms = self.registry.on_disconnect(connection_id).await;
        tracing::info!(
            "Connection '{}' disconnected (left {} room(s))",
            connection_id,
            rooms.len()
        );
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageDraft, RoomEvent},
        infrastructure::repository::{InMemoryRoomRepository, InMemorySubscriptionRegistry},
        usecase::relay::RoomRelay,
    };
    use tokio::sync::mpsc;

    fn chat_id(id: &str) -> ChatId {
        ChatId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_disconnect_stops_delivery() {
        // テスト項目: 切断後はメッセージが届かず、購読者一覧からも消える
        // given (前提条件):
        let registry = Arc::new(InMemorySubscriptionRegistry::new());
        let relay = RoomRelay::new(Arc::new(InMemoryRoomRepository::new()), registry.clone());
        let usecase = DisconnectClientUseCase::new(registry.clone());

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::new("alice".to_string()).unwrap();
        let bob = ConnectionId::new("bob".to_string()).unwrap();
        registry.register(alice.clone(), tx1).await;
        registry.register(bob.clone(), tx2).await;
        for room in ["r1", "r2"] {
            relay.subscribe(&alice, &chat_id(room)).await.unwrap();
        }
        relay.subscribe(&bob, &chat_id("r1")).await.unwrap();
        while rx1.try_recv().is_ok() {}
        while rx2.try_recv().is_ok() {}

        // when (操作): alice を切断
        let rooms = usecase.execute(&alice).await;
        relay
            .append_and_broadcast(&chat_id("r1"), MessageDraft::human(None, Some("x".into())))
            .await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert!(rx1.try_recv().is_err());
        assert!(matches!(rx2.try_recv(), Ok(RoomEvent::NewMessage(_))));
        assert_eq!(registry.members_of(&chat_id("r1")).await, vec![bob]);
        assert!(registry.members_of(&chat_id("r2")).await.is_empty());
        assert_eq!(registry.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_unknown_connection() {
        // テスト項目: 未登録の接続を切断しても何も起きない
        // given (前提条件):
        let registry = Arc::new(InMemorySubscriptionRegistry::new());
        let usecase = DisconnectClientUseCase::new(registry.clone());
        let ghost = ConnectionId::new("ghost".to_string()).unwrap();

        // when (操作):
        let rooms = usecase.execute(&ghost).await;

        // then (期待する結果):
        assert!(rooms.is_empty());
        assert_eq!(registry.count_connections().await, 0);
    }
}
