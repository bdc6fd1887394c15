//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{AdminGateError, AiResponderError, RepositoryError};

/// AI 返信リクエストのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestAiReplyError {
    /// 管理者により AI 返信が無効化されている
    #[error("AI responses are currently disabled")]
    AiDisabled,

    /// AI バックエンドの呼び出しに失敗した（ルームは変更されない）
    #[error("AI backend error: {0}")]
    AiBackend(#[from] AiResponderError),
}

/// ルーム参加・退出のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 接続が登録されていない
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),
}

impl From<RepositoryError> for JoinRoomError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionNotFound(id) => JoinRoomError::ConnectionNotFound(id),
        }
    }
}

/// AI トグル更新のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiToggleError {
    /// 真偽値以外が渡された
    #[error("Invalid toggle state: {0}")]
    InvalidArgument(String),
}

impl From<AdminGateError> for AiToggleError {
    fn from(err: AdminGateError) -> Self {
        match err {
            AdminGateError::InvalidArgument(value) => AiToggleError::InvalidArgument(value),
        }
    }
}
