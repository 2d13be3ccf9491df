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

use crate::domain::{ConnectionId, OutboundFrame};
use crate::infrastructure::dto::websocket::ClientFrame;
use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that drains the outbound queue into the socket, mapping
/// each frame to its wire representation. Ends when the queue closes or
/// a `Close` frame is drained.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Event(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Probe => {
                    if sender.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Create the outbound queue for this client and register everywhere.
    let (tx, rx) = mpsc::unbounded_channel();
    state.connect_client_usecase.execute(connection_id, tx).await;
    tracing::info!("connection '{}' accepted", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_frame(&state_clone, connection_id, &text).await;
                }
                Message::Pong(_) => {
                    state_clone.heartbeat.pulse(&connection_id).await;
                }
                Message::Ping(_) => {
                    // Answered with a pong by the protocol layer.
                }
                Message::Binary(_) => {
                    // Not part of the protocol; dropped like any other
                    // unreadable frame.
                }
                Message::Close(_) => {
                    tracing::info!("connection '{}' requested close", connection_id);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Runs for every ended socket, including heartbeat evictions.
    state.disconnect_client_usecase.execute(connection_id).await;
    tracing::info!("connection '{}' cleaned up", connection_id);
}

/// Parse and route one inbound text frame. Malformed frames and unknown
/// types are dropped without a reply.
async fn dispatch_frame(state: &Arc<AppState>, connection_id: ConnectionId, raw: &str) {
    let frame = match serde_json::from_str::<ClientFrame>(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!("dropping unparseable frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match frame {
        ClientFrame::Join {
            username,
            target_owner,
        } => {
            if let Err(e) = state
                .join_room_usecase
                .execute(connection_id, username.as_deref(), target_owner.as_deref())
                .await
            {
                tracing::warn!("join from '{}' failed: {}", connection_id, e);
            }
        }
        ClientFrame::Message { text } => {
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id, text.as_deref())
                .await
            {
                tracing::debug!("message from '{}' rejected: {}", connection_id, e);
            }
        }
    }
}
