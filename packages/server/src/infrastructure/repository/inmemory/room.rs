//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス終了とともに履歴は消えます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    ChatId, ChatMessage, MessageDraft, MessageIdFactory, Room, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
///
/// ルームは最初の append で暗黙的に作成され、以後削除されません。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ChatId -> Room
    rooms: RwLock<HashMap<ChatId, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn append(&self, chat_id: &ChatId, draft: MessageDraft, now: Timestamp) -> ChatMessage {
        // ルーム作成と追記は同じ書き込みロックの中で行う
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(chat_id.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", chat_id);
            Room::new(chat_id.clone())
        });
        room.append(MessageIdFactory::generate(), draft, now)
    }

    async fn history(&self, chat_id: &ChatId) -> Vec<ChatMessage> {
        let rooms = self.rooms.read().await;
        rooms
            .get(chat_id)
            .map(|room| room.messages.clone())
            .unwrap_or_default()
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.len()
    }
}
