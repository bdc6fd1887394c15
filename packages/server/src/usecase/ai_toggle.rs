//! UseCase: AI 返信の有効 / 無効の切り替え

use std::sync::Arc;

use crate::domain::AdminGate;

use super::error::AiToggleError;

/// AI トグルのユースケース
pub struct AiToggleUseCase {
    gate: Arc<AdminGate>,
}

impl AiToggleUseCase {
    /// 新しい AiToggleUseCase を作成
    pub fn new(gate: Arc<AdminGate>) -> Self {
        Self { gate }
    }

    /// 現在の状態
    pub fn current(&self) -> bool {
        self.gate.is_enabled()
    }

    /// 状態を更新し、更新後の値を返す
    ///
    /// 真偽値以外は `InvalidArgument` となり、状態は変わらない
    pub fn execute(&self, enabled: &serde_json::Value) -> Result<bool, AiToggleError> {
        let enabled = self.gate.apply_toggle(enabled)?;
        tracing::info!("AI responses {}", if enabled { "enabled" } else { "disabled" });
        Ok(enabled)
    }
}
