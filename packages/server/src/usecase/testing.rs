//! Test doubles shared by the usecase tests.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// A `MessagePusher` that records every event it delivers, so tests can
/// assert on the exact per-client event sequences.
pub(crate) struct RecordingPusher {
    sent: Mutex<Vec<(ConnectionId, String)>>,
}

impl RecordingPusher {
    pub(crate) fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Events delivered to one client, in delivery order, parsed as JSON.
    pub(crate) async fn events_for(&self, id: &ConnectionId) -> Vec<Value> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(target, _)| target == id)
            .map(|(_, content)| serde_json::from_str(content).expect("recorded event is JSON"))
            .collect()
    }

    /// Every delivered event with its target.
    pub(crate) async fn all_events(&self) -> Vec<(ConnectionId, Value)> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|(target, content)| {
                (
                    *target,
                    serde_json::from_str(content).expect("recorded event is JSON"),
                )
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub(crate) async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, _connection_id: ConnectionId, _sender: PusherChannel) {
        // No socket behind this double.
    }

    async fn unregister_client(&self, _connection_id: &ConnectionId) {}

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .await
            .push((*connection_id, content.to_string()));
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) {
        let mut sent = self.sent.lock().await;
        for target in targets {
            sent.push((target, content.to_string()));
        }
    }

    async fn probe(&self, _connection_id: &ConnectionId) -> Result<(), MessagePushError> {
        Ok(())
    }

    async fn close(&self, _connection_id: &ConnectionId) {
        // Termination is exercised with the mockall double instead.
    }
}
