//! UseCase: ルーム参加・退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase / LeaveRoomUseCase の execute()
//!
//! ### なぜこのテストが必要か
//! - 参加後は以降の全メッセージが届き、退出後は届かないことを保証する
//! - 参加の冪等性（2 回参加しても重複して届かない）を保証する

use std::sync::Arc;

use crate::domain::{ChatId, ConnectionId};

use super::{error::JoinRoomError, relay::RoomRelay};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Relay Engine（参加確認をルームの順序に揃えるため）
    relay: Arc<RoomRelay>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(relay: Arc<RoomRelay>) -> Self {
        Self { relay }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 新規に参加した
    /// * `Ok(false)` - すでに参加済み（何も変わらない）
    /// * `Err(JoinRoomError)` - 接続が登録されていない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, JoinRoomError> {
        let added = self.relay.subscribe(connection_id, chat_id).await?;
        if added {
            tracing::info!("Connection '{}' joined room '{}'", connection_id, chat_id);
        }
        Ok(added)
    }
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    relay: Arc<RoomRelay>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(relay: Arc<RoomRelay>) -> Self {
        Self { relay }
    }

    /// ルーム退出を実行。参加していなければ Ok(false)
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, JoinRoomError> {
        let removed = self.relay.unsubscribe(connection_id, chat_id).await?;
        if removed {
            tracing::info!("Connection '{}' left room '{}'", connection_id, chat_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageDraft, RoomEvent},
        infrastructure::repository::{InMemoryRoomRepository, InMemorySubscriptionRegistry},
    };
    use tokio::sync::mpsc;

    fn create_test_relay() -> Arc<RoomRelay> {
        Arc::new(RoomRelay::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySubscriptionRegistry::new()),
        ))
    }

    fn chat_id(id: &str) -> ChatId {
        ChatId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_twice_delivers_once() {
        // テスト項目: 2 回参加してもメッセージは 1 回だけ届く
        // given (前提条件):
        let relay = create_test_relay();
        let usecase = JoinRoomUseCase::new(relay.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::new("c1".to_string()).unwrap();
        relay.registry().register(connection_id.clone(), tx).await;

        // when (操作):
        let first = usecase.execute(&connection_id, &chat_id("r1")).await;
        let second = usecase.execute(&connection_id, &chat_id("r1")).await;
        let stored = relay
            .append_and_broadcast(&chat_id("r1"), MessageDraft::human(None, Some("x".into())))
            .await;

        // then (期待する結果):
        assert_eq!(first, Ok(true));
        assert_eq!(second, Ok(false));
        assert_eq!(rx.try_recv().unwrap(), RoomEvent::Joined(chat_id("r1")));
        assert_eq!(rx.try_recv().unwrap(), RoomEvent::Joined(chat_id("r1")));
        assert_eq!(rx.try_recv().unwrap(), RoomEvent::NewMessage(stored));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_unknown_connection() {
        // テスト項目: 未登録の接続の参加はエラーになる
        // given (前提条件):
        let usecase = JoinRoomUseCase::new(create_test_relay());
        let connection_id = ConnectionId::new("ghost".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(&connection_id, &chat_id("r1")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::ConnectionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_leave_without_join() {
        // テスト項目: 参加していないルームからの退出は Ok(false)
        // given (前提条件):
        let relay = create_test_relay();
        let usecase = LeaveRoomUseCase::new(relay.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::new("c1".to_string()).unwrap();
        relay.registry().register(connection_id.clone(), tx).await;

        // when (操作):
        let result = usecase.execute(&connection_id, &chat_id("r1")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(false));
    }
}
