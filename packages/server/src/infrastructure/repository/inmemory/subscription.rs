//! InMemory Subscription Registry 実装
//!
//! 接続 ID → (送信キュー, 参加ルーム) と ルーム → 購読者 の 2 つの索引を
//! 1 つの Mutex で守り、常に整合した状態に保ちます。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{ChatId, ConnectionId, RepositoryError, RoomEvent, SubscriptionRegistry};

/// 接続ごとの情報
struct ConnectionEntry {
    /// 送信キュー（WebSocket の送信タスクが受信側を持つ）
    outbound: UnboundedSender<RoomEvent>,
    /// 参加中のルーム
    rooms: HashSet<ChatId>,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    members: HashMap<ChatId, HashSet<ConnectionId>>,
}

impl RegistryState {
    /// 接続と全ての購読を削除し、参加していたルームを返す
    fn remove_connection(&mut self, connection_id: &ConnectionId) -> Vec<ChatId> {
        let Some(entry) = self.connections.remove(connection_id) else {
            return Vec::new();
        };

        for chat_id in &entry.rooms {
            if let Some(members) = self.members.get_mut(chat_id) {
                members.remove(connection_id);
                if members.is_empty() {
                    self.members.remove(chat_id);
                }
            }
        }

        entry.rooms.into_iter().collect()
    }
}

/// インメモリ Subscription Registry 実装
#[derive(Default)]
pub struct InMemorySubscriptionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemorySubscriptionRegistry {
    /// 新しい InMemorySubscriptionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRegistry for InMemorySubscriptionRegistry {
    async fn register(&self, connection_id: ConnectionId, outbound: UnboundedSender<RoomEvent>) {
        let mut state = self.state.lock().await;
        // 同じ ID の古い登録が残っていれば購読ごと置き換える
        state.remove_connection(&connection_id);
        state.connections.insert(
            connection_id,
            ConnectionEntry {
                outbound,
                rooms: HashSet::new(),
            },
        );
    }

    async fn join(
        &self,
        connection_id: &ConnectionId,
        chat_id: ChatId,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;

        let added = entry.rooms.insert(chat_id.clone());
        if added {
            state
                .members
                .entry(chat_id)
                .or_default()
                .insert(connection_id.clone());
        }
        Ok(added)
    }

    async fn leave(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;

        let removed = entry.rooms.remove(chat_id);
        if removed && let Some(members) = state.members.get_mut(chat_id) {
            members.remove(connection_id);
            if members.is_empty() {
                state.members.remove(chat_id);
            }
        }
        Ok(removed)
    }

    async fn members_of(&self, chat_id: &ChatId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .members
            .get(chat_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn on_disconnect(&self, connection_id: &ConnectionId) -> Vec<ChatId> {
        let mut state = self.state.lock().await;
        state.remove_connection(connection_id)
    }

    async fn publish(&self, chat_id: &ChatId, event: RoomEvent) -> usize {
        let state = self.state.lock().await;
        let Some(members) = state.members.get(chat_id) else {
            return 0;
        };

        let mut delivered = 0;
        for connection_id in members {
            let Some(entry) = state.connections.get(connection_id) else {
                continue;
            };
            // 切断済みの接続は飛ばし、他の購読者への配信は続ける
            if entry.outbound.send(event.clone()).is_err() {
                tracing::warn!(
                    "Failed to deliver event for room '{}' to connection '{}'",
                    chat_id,
                    connection_id
                );
                continue;
            }
            delivered += 1;
        }
        delivered
    }

    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: RoomEvent,
    ) -> Result<(), RepositoryError> {
        let state = self.state.lock().await;
        let entry = state
            .connections
            .get(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;

        if entry.outbound.send(event).is_err() {
            tracing::warn!("Failed to send event to connection '{}'", connection_id);
        }
        Ok(())
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 参加（冪等性）・退出・切断時の購読削除
    // - publish が購読者だけに届き、死んだキューで止まらないこと
    //
    // 【なぜこのテストが必要か】
    // - ブロードキャスト対象はこの Registry だけが知っている
    // - 切断済み接続の購読が残るとメモリリークと配信エラーの原因になる
    // ========================================

    fn chat_id(id: &str) -> ChatId {
        ChatId::new(id.to_string()).unwrap()
    }

    fn connection_id(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn sample_event() -> RoomEvent {
        RoomEvent::Joined(chat_id("r1"))
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        // テスト項目: 同じルームに 2 回参加しても購読は 1 つ
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(connection_id("c1"), tx).await;

        // when (操作):
        let first = registry.join(&connection_id("c1"), chat_id("r1")).await;
        let second = registry.join(&connection_id("c1"), chat_id("r1")).await;

        // then (期待する結果):
        assert_eq!(first, Ok(true));
        assert_eq!(second, Ok(false));
        assert_eq!(
            registry.members_of(&chat_id("r1")).await,
            vec![connection_id("c1")]
        );
    }

    #[tokio::test]
    async fn test_join_unregistered_connection_fails() {
        // テスト項目: 未登録の接続は参加できない
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();

        // when (操作):
        let result = registry.join(&connection_id("ghost"), chat_id("r1")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::ConnectionNotFound("ghost".to_string()))
        );
        assert!(registry.members_of(&chat_id("r1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_publish_reaches_members_only() {
        // テスト項目: publish は参加者にだけ届く
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(connection_id("c1"), tx1).await;
        registry.register(connection_id("c2"), tx2).await;
        registry
            .join(&connection_id("c1"), chat_id("r1"))
            .await
            .unwrap();
        registry
            .join(&connection_id("c2"), chat_id("r2"))
            .await
            .unwrap();

        // when (操作):
        let delivered = registry.publish(&chat_id("r1"), sample_event()).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx1.try_recv().unwrap(), sample_event());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_skips_dead_queue() {
        // テスト項目: 受信側が閉じた接続があっても他の購読者への配信は続く
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.register(connection_id("dead"), tx_dead).await;
        registry.register(connection_id("live"), tx_live).await;
        for id in ["dead", "live"] {
            registry
                .join(&connection_id(id), chat_id("r1"))
                .await
                .unwrap();
        }
        drop(rx_dead);

        // when (操作):
        let delivered = registry.publish(&chat_id("r1"), sample_event()).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(rx_live.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_leave_stops_delivery() {
        // テスト項目: 退出後はそのルームのイベントが届かない
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(connection_id("c1"), tx).await;
        registry
            .join(&connection_id("c1"), chat_id("r1"))
            .await
            .unwrap();

        // when (操作):
        let left = registry.leave(&connection_id("c1"), &chat_id("r1")).await;
        let delivered = registry.publish(&chat_id("r1"), sample_event()).await;

        // then (期待する結果):
        assert_eq!(left, Ok(true));
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
        assert_eq!(
            registry.leave(&connection_id("c1"), &chat_id("r1")).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn test_on_disconnect_removes_all_subscriptions() {
        // テスト項目: 切断すると全ての購読が削除される
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(connection_id("c1"), tx).await;
        for room in ["r1", "r2"] {
            registry
                .join(&connection_id("c1"), chat_id(room))
                .await
                .unwrap();
        }

        // when (操作):
        let mut left_rooms = registry.on_disconnect(&connection_id("c1")).await;
        left_rooms.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        // then (期待する結果):
        assert_eq!(left_rooms, vec![chat_id("r1"), chat_id("r2")]);
        assert!(registry.members_of(&chat_id("r1")).await.is_empty());
        assert!(registry.members_of(&chat_id("r2")).await.is_empty());
        assert_eq!(registry.count_connections().await, 0);
        assert!(registry.on_disconnect(&connection_id("c1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_send_to_single_connection() {
        // テスト項目: send_to は指定した接続にだけ届く
        // given (前提条件):
        let registry = InMemorySubscriptionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(connection_id("c1"), tx1).await;
        registry.register(connection_id("c2"), tx2).await;

        // when (操作):
        let result = registry
            .send_to(&connection_id("c2"), RoomEvent::Left(chat_id("r1")))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(rx1.try_recv().is_err());
        assert_eq!(rx2.try_recv().unwrap(), RoomEvent::Left(chat_id("r1")));
    }
}
