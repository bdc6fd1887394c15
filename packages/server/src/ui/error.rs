//! API error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::http::ErrorResponseDto,
    usecase::{AiToggleError, RequestAiReplyError},
};

/// Body text of the 500 returned when the AI backend fails
pub const AI_BACKEND_FAILED: &str = "Błąd przy wywołaniu AI";

/// Errors returned by HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponseDto {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(err: ValueObjectError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<RequestAiReplyError> for ApiError {
    fn from(err: RequestAiReplyError) -> Self {
        match err {
            RequestAiReplyError::AiDisabled => {
                ApiError::Forbidden("AI responses are currently disabled".to_string())
            }
            // Backend details stay in the server log
            RequestAiReplyError::AiBackend(_) => {
                ApiError::Internal(AI_BACKEND_FAILED.to_string())
            }
        }
    }
}

impl From<AiToggleError> for ApiError {
    fn from(err: AiToggleError) -> Self {
        match err {
            AiToggleError::InvalidArgument(_) => {
                ApiError::BadRequest("Invalid toggle state".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AiResponderError;

    #[test]
    fn test_status_mapping() {
        // テスト項目: エラーの種類ごとに HTTP ステータスが決まる
        // when (操作):
        let disabled = ApiError::from(RequestAiReplyError::AiDisabled);
        let backend = ApiError::from(RequestAiReplyError::AiBackend(
            AiResponderError::Timeout(100),
        ));
        let toggle = ApiError::from(AiToggleError::InvalidArgument("1".to_string()));
        let chat_id = ApiError::from(ValueObjectError::ChatIdEmpty);

        // then (期待する結果):
        assert_eq!(disabled.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            backend.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(toggle.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(chat_id.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ai_backend_failure_body() {
        // テスト項目: AI バックエンド失敗時のボディは固定の文言で、内部の詳細を含まない
        // given (前提条件):
        let err = ApiError::from(RequestAiReplyError::AiBackend(AiResponderError::Request(
            "connection refused".to_string(),
        )));

        // when (操作):
        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        // then (期待する結果):
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Błąd przy wywołaniu AI"}));
    }
}
