//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatId, ConnectionId, RoomEvent},
    infrastructure::dto::websocket::{ClientFrame, ServerFrame},
    ui::state::AppState,
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, JoinRoomUseCase, LeaveRoomUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Room events for this connection, filled by the Subscription Registry
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RoomEvent>();
    // Replies that only concern this connection (protocol errors)
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ServerFrame>();

    let connect_usecase = ConnectClientUseCase::new(state.registry().clone());
    let connection_id = connect_usecase.execute(event_tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let (mut sender, mut receiver) = socket.split();

    // Spawn a task to forward room events and replies to this client
    let send_connection_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                Some(event) = event_rx.recv() => ServerFrame::from(&event),
                Some(frame) = reply_rx.recv() => frame,
                else => break,
            };

            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to serialize frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!("Connection '{}' stopped accepting frames", send_connection_id);
                break;
            }
        }
    });

    // Spawn a task to receive frames from this client
    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text.as_str());
                    if let Err(reason) =
                        handle_client_frame(&recv_state, &recv_connection_id, text.as_str()).await
                    {
                        tracing::warn!(
                            "Rejected frame from '{}': {}",
                            recv_connection_id,
                            reason
                        );
                        let _ = reply_tx.send(ServerFrame::Error { reason });
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectClientUseCase::new(state.registry().clone());
    disconnect_usecase.execute(&connection_id).await;
}

/// Apply one client frame; the error string is sent back as an `error` frame.
async fn handle_client_frame(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    text: &str,
) -> Result<(), String> {
    let frame = serde_json::from_str::<ClientFrame>(text)
        .map_err(|e| format!("Invalid frame: {}", e))?;

    match frame {
        ClientFrame::JoinChat { chat_id } => {
            let chat_id = ChatId::new(chat_id).map_err(|e| e.to_string())?;
            JoinRoomUseCase::new(state.relay.clone())
                .execute(connection_id, &chat_id)
                .await
                .map_err(|e| e.to_string())?;
        }
        ClientFrame::LeaveChat { chat_id } => {
            let chat_id = ChatId::new(chat_id).map_err(|e| e.to_string())?;
            LeaveRoomUseCase::new(state.relay.clone())
                .execute(connection_id, &chat_id)
                .await
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
