//! UseCase: accept a new connection.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomRegistry};

/// Registers a freshly accepted connection with the registry and attaches
/// its outbound queue. The client stays roomless until its first join
/// frame.
pub struct ConnectClientUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.register(connection_id).await;
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        tracing::debug!("connection '{}' registered", connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_the_connection() {
        // given (precondition):
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectClientUseCase::new(registry.clone(), message_pusher.clone());

        // when (operation):
        let connection_id = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        usecase.execute(connection_id, tx).await;

        // then (expected result): tracked by the registry, reachable via
        // the pusher
        assert_eq!(registry.connection_count().await, 1);
        assert!(message_pusher.push_to(&connection_id, "hi").await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_tracks_each_connection_separately() {
        // given (precondition):
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectClientUseCase::new(registry.clone(), message_pusher);

        // when (operation): two clients connect
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase.execute(ConnectionId::generate(), tx1).await;
        usecase.execute(ConnectionId::generate(), tx2).await;

        // then (expected result):
        assert_eq!(registry.connection_count().await, 2);
    }
}
