//! UseCase: 履歴取得処理

use std::sync::Arc;

use crate::domain::{ChatId, ChatMessage, RoomRepository};

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetHistoryUseCase {
    /// 新しい GetHistoryUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームの履歴を追加順で返す。未知のルームは空
    pub async fn execute(&self, chat_id: &ChatId) -> Vec<ChatMessage> {
        self.repository.history(chat_id).await
    }
}
