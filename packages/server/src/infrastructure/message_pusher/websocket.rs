//! WebSocket implementation of the client-sink contract.
//!
//! Sockets are accepted in the UI layer; this adapter only keeps each
//! connection's outbound queue and writes frames into it. A queue whose
//! receiver is gone counts as a non-writable sink and is skipped — the
//! relay never retries a send.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, OutboundFrame, PusherChannel};

/// WebSocket-backed [`MessagePusher`].
pub struct WebSocketMessagePusher {
    /// Outbound queue per connected client.
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(OutboundFrame::Event(content.to_string()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) {
        let clients = self.clients.lock().await;
        for target in targets {
            match clients.get(&target) {
                Some(sender) => {
                    if sender
                        .send(OutboundFrame::Event(content.to_string()))
                        .is_err()
                    {
                        tracing::warn!("sink for '{}' is closed, skipping", target);
                    }
                }
                None => {
                    tracing::warn!("connection '{}' not found during broadcast, skipping", target);
                }
            }
        }
    }

    async fn probe(&self, connection_id: &ConnectionId) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(OutboundFrame::Probe)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn close(&self, connection_id: &ConnectionId) {
        let clients = self.clients.lock().await;
        if let Some(sender) = clients.get(connection_id) {
            // The socket may already be unwinding; a failed close is fine.
            let _ = sender.send(OutboundFrame::Close);
        }
    }
}
