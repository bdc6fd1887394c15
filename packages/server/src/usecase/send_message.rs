//! UseCase: メッセージ送信処理（submitHuman）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加と、ルーム参加者へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信したメッセージが履歴と購読者の両方に同じ内容で届くことを保証する
//! - sender / message が欠けていても拒否しない方針を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者がいるルームへの送信
//! - エッジケース：参加者がいないルーム、未知のルーム、欠けたフィールド

use std::sync::Arc;

use crate::domain::{ChatId, ChatMessage, MessageDraft};

use super::relay::RoomRelay;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Relay Engine（直列化ポイント）
    relay: Arc<RoomRelay>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(relay: Arc<RoomRelay>) -> Self {
        Self { relay }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `chat_id` - 送信先ルーム（Domain Model）
    /// * `sender` - 送信者名（欠けていてもよい）
    /// * `message` - 本文（欠けていてもよい）
    ///
    /// # Returns
    ///
    /// 保存済みのメッセージ。戻る時点で追加とブロードキャストは完了している
    pub async fn execute(
        &self,
        chat_id: ChatId,
        sender: Option<String>,
        message: Option<String>,
    ) -> ChatMessage {
        let stored = self
            .relay
            .append_and_broadcast(&chat_id, MessageDraft::human(sender, message))
            .await;
        tracing::info!(
            "Message '{}' stored in room '{}' (sender: {:?})",
            stored.id,
            chat_id,
            stored.sender
        );
        stored
    }
}
