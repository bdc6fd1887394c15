//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    domain::ChatId,
    infrastructure::dto::http::{
        AiToggleDto, ChatMessageDto, HealthDto, SubmitAiRequest, SubmitMessageRequest,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{AiToggleUseCase, GetHistoryUseCase, RequestAiReplyUseCase, SendMessageUseCase},
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        rooms: state.repository().count_rooms().await,
        connections: state.registry().count_connections().await,
    })
}

/// `POST /api/chat/{chat_id}/message`
///
/// The body is read leniently: missing fields or a broken body still store a message.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ChatMessageDto>), ApiError> {
    let chat_id = ChatId::new(chat_id)?;
    let (sender, message) = SubmitMessageRequest::from_body(&body).into_parts();

    let usecase = SendMessageUseCase::new(state.relay.clone());
    let stored = usecase.execute(chat_id, sender, message).await;

    Ok((StatusCode::CREATED, Json(ChatMessageDto::from(&stored))))
}

/// `POST /api/chat/{chat_id}/message/ai`
pub async fn post_ai_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ChatMessageDto>), ApiError> {
    let chat_id = ChatId::new(chat_id)?;
    let text = SubmitAiRequest::from_body(&body).into_text();

    let usecase = RequestAiReplyUseCase::new(
        state.relay.clone(),
        state.responder.clone(),
        state.gate.clone(),
    );
    let stored = usecase.execute(chat_id, text).await?;

    Ok((StatusCode::CREATED, Json(ChatMessageDto::from(&stored))))
}

/// `GET /api/chat/{chat_id}/messages`
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<ChatMessageDto>>, ApiError> {
    let chat_id = ChatId::new(chat_id)?;

    let usecase = GetHistoryUseCase::new(state.repository().clone());
    let history = usecase.execute(&chat_id).await;

    Ok(Json(history.iter().map(ChatMessageDto::from).collect()))
}

/// `GET /api/admin/ai-toggle`
pub async fn get_ai_toggle(State(state): State<Arc<AppState>>) -> Json<AiToggleDto> {
    let usecase = AiToggleUseCase::new(state.gate.clone());
    Json(AiToggleDto {
        enabled: usecase.current(),
    })
}

/// `POST /api/admin/ai-toggle`
pub async fn post_ai_toggle(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AiToggleDto>, ApiError> {
    let enabled = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|body| body.get("enabled").cloned())
        .unwrap_or(Value::Null);

    let usecase = AiToggleUseCase::new(state.gate.clone());
    let enabled = usecase.execute(&enabled)?;

    Ok(Json(AiToggleDto { enabled }))
}
