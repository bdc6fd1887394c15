//! UseCase: AI 返信リクエスト処理（submitAIRequest）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RequestAiReplyUseCase::execute() メソッド
//! - Admin Gate による抑止、AI 呼び出し、返信の追加とブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 無効化中はアダプタを呼ばず、履歴も変更しないことを保証する
//! - バックエンド失敗時にルームが変更されないことを保証する
//! - AI 呼び出し中もルームが他のメッセージを受け付けることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：AI 返信が sender="ai" / type="ai" で追加される
//! - 異常系：無効化中、バックエンド失敗
//! - 並行性：AI 待ちの間に人間のメッセージが割り込む

use std::sync::Arc;

use crate::domain::{AdminGate, AiResponder, ChatId, ChatMessage, MessageDraft};

use super::{error::RequestAiReplyError, relay::RoomRelay};

/// AI 返信リクエストのユースケース
pub struct RequestAiReplyUseCase {
    /// Relay Engine（直列化ポイント）
    relay: Arc<RoomRelay>,
    /// AI Responder Adapter
    responder: Arc<dyn AiResponder>,
    /// Admin Gate
    gate: Arc<AdminGate>,
}

impl RequestAiReplyUseCase {
    /// 新しい RequestAiReplyUseCase を作成
    pub fn new(
        relay: Arc<RoomRelay>,
        responder: Arc<dyn AiResponder>,
        gate: Arc<AdminGate>,
    ) -> Self {
        Self {
            relay,
            responder,
            gate,
        }
    }

    /// AI 返信リクエストを実行
    ///
    /// AI の呼び出し中はルームロックを持たない。返信は追加された時点の末尾に並ぶ。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 保存・配信済みの AI メッセージ
    /// * `Err(RequestAiReplyError)` - 無効化中、またはバックエンド失敗（ルームは変更されない）
    pub async fn execute(
        &self,
        chat_id: ChatId,
        text: String,
    ) -> Result<ChatMessage, RequestAiReplyError> {
        if !self.gate.is_enabled() {
            tracing::info!("AI reply requested for room '{}' while disabled", chat_id);
            return Err(RequestAiReplyError::AiDisabled);
        }

        let answer = self.responder.ask(&text).await.map_err(|e| {
            tracing::error!("AI backend failed for room '{}': {}", chat_id, e);
            RequestAiReplyError::from(e)
        })?;

        let stored = self
            .relay
            .append_and_broadcast(&chat_id, MessageDraft::ai(answer))
            .await;
        tracing::info!("AI reply '{}' stored in room '{}'", stored.id, chat_id);
        Ok(stored)
    }
}
