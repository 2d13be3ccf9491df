//! In-memory `RoomRegistry` implementation.
//!
//! One `Mutex` guards the whole aggregate, so each trait call runs as a
//! single serialized step. Inbound frames, join/leave transitions, and
//! heartbeat sweeps all contend on this lock and on nothing else.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, JoinError, JoinOutcome, MessageOutcome, MessageText, Registry,
    RoomDetail, RoomId, RoomRegistry, RoomSummary, SendError, SweepOutcome, Timestamp, Username,
};

/// The only registry implementation: a locked [`Registry`] aggregate.
pub struct InMemoryRoomRegistry {
    registry: Mutex<Registry>,
}

impl InMemoryRoomRegistry {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            registry: Mutex::new(Registry::new(history_capacity)),
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn register(&self, id: ConnectionId) {
        self.registry.lock().await.register(id);
    }

    async fn mark_alive(&self, id: &ConnectionId) {
        self.registry.lock().await.mark_alive(id);
    }

    async fn join(
        &self,
        id: ConnectionId,
        username: Username,
        target_owner: Option<Username>,
        now: Timestamp,
    ) -> Result<JoinOutcome, JoinError> {
        self.registry.lock().await.join(id, username, target_owner, now)
    }

    async fn append_message(
        &self,
        id: &ConnectionId,
        text: MessageText,
        ts: Timestamp,
    ) -> Result<MessageOutcome, SendError> {
        self.registry.lock().await.append_message(id, text, ts)
    }

    async fn remove(&self, id: &ConnectionId) -> Option<Departure> {
        self.registry.lock().await.remove(id)
    }

    async fn sweep(&self) -> SweepOutcome {
        self.registry.lock().await.sweep()
    }

    async fn connection_count(&self) -> usize {
        self.registry.lock().await.connection_count()
    }

    async fn room_summaries(&self) -> Vec<RoomSummary> {
        self.registry.lock().await.room_summaries()
    }

    async fn room_detail(&self, id: &RoomId) -> Option<RoomDetail> {
        self.registry.lock().await.room_detail(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> Username {
        Username::sanitize(Some(raw))
    }

    #[tokio::test]
    async fn test_register_and_remove_round_trip() {
        // given (precondition):
        let registry = InMemoryRoomRegistry::new(50);
        let id = ConnectionId::generate();

        // when (operation):
        registry.register(id).await;

        // then (expected result):
        assert_eq!(registry.connection_count().await, 1);

        registry.remove(&id).await;
        assert_eq!(registry.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_join_through_the_trait_is_atomic_per_call() {
        // given (precondition): alice waits alone
        let registry = InMemoryRoomRegistry::new(50);
        let x = ConnectionId::generate();
        registry.register(x).await;
        registry
            .join(x, name("alice"), None, Timestamp::new(0))
            .await
            .unwrap();

        // when (operation): bob joins her through the trait
        let y = ConnectionId::generate();
        registry.register(y).await;
        let outcome = registry
            .join(y, name("bob"), Some(name("alice")), Timestamp::new(0))
            .await
            .unwrap();

        // then (expected result): both ended up in room 1
        assert_eq!(outcome.room_id.to_string(), "1");
        assert_eq!(outcome.users, vec![name("alice"), name("bob")]);
    }

    #[tokio::test]
    async fn test_remove_of_an_unknown_connection_is_idempotent() {
        // given (precondition):
        let registry = InMemoryRoomRegistry::new(50);
        let ghost = ConnectionId::generate();

        // when (operation):
        let departure = registry.remove(&ghost).await;

        // then (expected result): no panic, nothing to announce
        assert_eq!(departure, None);
    }

    #[tokio::test]
    async fn test_sweep_through_the_trait() {
        // given (precondition):
        let registry = InMemoryRoomRegistry::new(50);
        let id = ConnectionId::generate();
        registry.register(id).await;

        // when (operation): two sweeps with no pulse in between
        let first = registry.sweep().await;
        let second = registry.sweep().await;

        // then (expected result): probed, then expired
        assert_eq!(first.probed, vec![id]);
        assert_eq!(second.expired, vec![id]);
    }
}
