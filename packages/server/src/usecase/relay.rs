//! Relay Engine の中核: ルームごとの直列化ポイント
//!
//! 追記とファンアウトを同じルームロックの中で行うことで、
//! 履歴の順序と全購読者が受け取る順序を一致させます。
//! ルームごとにロックが分かれているため、別のルームの処理は並行に進みます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - append_and_broadcast() と subscribe() / unsubscribe()
//!
//! ### なぜこのテストが必要か
//! - 並行送信時にも履歴と配信順が一致することを保証する
//! - 参加確認（Joined）より前のメッセージが届かないことを保証する

use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};

use roomrelay_shared::time::now_millis;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    ChatId, ChatMessage, ConnectionId, MessageDraft, RepositoryError, RoomEvent, RoomRepository,
    SubscriptionRegistry, Timestamp,
};

type LockTable = StdMutex<HashMap<ChatId, Arc<Mutex<()>>>>;

/// 保持中のルームロック
///
/// 解放時、他に待っている処理が無ければロック表のエントリも消す。
struct RoomGuard<'a> {
    locks: &'a LockTable,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RoomGuard<'_> {
    fn drop(&mut self) {
        // ガードが持つ Arc を先に手放す
        self.guard.take();

        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // 取得待ちのまま取り消された呼び出しの残りもここで掃除する
        locks.retain(|_, room_lock| Arc::strong_count(room_lock) > 1);
    }
}

/// ルームの直列化ポイントを持つリレー
pub struct RoomRelay {
    /// Room Store
    repository: Arc<dyn RoomRepository>,
    /// Subscription Registry
    registry: Arc<dyn SubscriptionRegistry>,
    /// ChatId -> ルームロック（処理中のルームだけ）
    locks: LockTable,
}

impl RoomRelay {
    /// 新しい RoomRelay を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn SubscriptionRegistry>,
    ) -> Self {
        Self {
            repository,
            registry,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn repository(&self) -> &Arc<dyn RoomRepository> {
        &self.repository
    }

    pub fn registry(&self) -> &Arc<dyn SubscriptionRegistry> {
        &self.registry
    }

    /// ルームロックを取得する
    ///
    /// 返したガードが最後の利用者なら、解放時にロック表から取り除かれる。
    async fn lock_room(&self, chat_id: &ChatId) -> RoomGuard<'_> {
        let room_lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(chat_id.clone()).or_default().clone()
        };
        RoomGuard {
            locks: &self.locks,
            guard: Some(room_lock.lock_owned().await),
        }
    }

    /// メッセージを追記し、ルームの全購読者に配信する
    ///
    /// 人間のメッセージも AI の返信も必ずここを通る。
    pub async fn append_and_broadcast(&self, chat_id: &ChatId, draft: MessageDraft) -> ChatMessage {
        let _guard = self.lock_room(chat_id).await;

        let stored = self
            .repository
            .append(chat_id, draft, Timestamp::new(now_millis()))
            .await;
        let delivered = self
            .registry
            .publish(chat_id, RoomEvent::NewMessage(stored.clone()))
            .await;

        tracing::debug!(
            "Message '{}' appended to room '{}' and delivered to {} subscriber(s)",
            stored.id,
            chat_id,
            delivered
        );
        stored
    }

    /// ルームに参加し、参加確認をその接続にだけ送る
    ///
    /// ルームロックの中で行うため、確認より前に新しいメッセージが届くことはない。
    pub async fn subscribe(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, RepositoryError> {
        let _guard = self.lock_room(chat_id).await;

        let added = self.registry.join(connection_id, chat_id.clone()).await?;
        self.registry
            .send_to(connection_id, RoomEvent::Joined(chat_id.clone()))
            .await?;
        Ok(added)
    }

    /// ルームから退出し、退出確認をその接続にだけ送る
    pub async fn unsubscribe(
        &self,
        connection_id: &ConnectionId,
        chat_id: &ChatId,
    ) -> Result<bool, RepositoryError> {
        let _guard = self.lock_room(chat_id).await;

        let removed = self.registry.leave(connection_id, chat_id).await?;
        self.registry
            .send_to(connection_id, RoomEvent::Left(chat_id.clone()))
            .await?;
        Ok(removed)
    }
}
