//! Heartbeat sweep: probe live connections, reclaim silent ones.
//!
//! A connection that produces no pulse between two sweeps is terminated
//! outright; there is no grace state. A probe that cannot even be
//! dispatched counts as a missed pulse too. Termination closes the sink,
//! which unwinds the socket task and runs the normal disconnect path —
//! so the room's survivors hear `user_left` the same way they would for
//! a clean close.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ConnectionId, MessagePusher, RoomRegistry};

/// Default milliseconds between sweeps.
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 30_000;

pub struct HeartbeatMonitor {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    interval: Duration,
}

impl HeartbeatMonitor {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            interval,
        }
    }

    /// A pulse from the client (WebSocket pong).
    pub async fn pulse(&self, connection_id: &ConnectionId) {
        self.registry.mark_alive(connection_id).await;
    }

    /// Sweep on the configured interval until the task is aborted at
    /// shutdown.
    pub async fn run(self: Arc<Self>) {
        loop {
            tokio::time::sleep(self.interval).await;
            self.sweep().await;
        }
    }

    /// One sweep pass: terminate everything that stayed silent, then
    /// probe the survivors for the next round.
    pub async fn sweep(&self) {
        let outcome = self.registry.sweep().await;

        for connection_id in &outcome.expired {
            tracing::warn!("connection '{}' missed its pulse, terminating", connection_id);
            self.message_pusher.close(connection_id).await;
        }

        for connection_id in &outcome.probed {
            if let Err(e) = self.message_pusher.probe(connection_id).await {
                tracing::warn!(
                    "probe dispatch to '{}' failed ({}), terminating",
                    connection_id,
                    e
                );
                self.message_pusher.close(connection_id).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePushError, MockMessagePusher};
    use crate::infrastructure::repository::InMemoryRoomRegistry;

    fn monitor(
        registry: Arc<InMemoryRoomRegistry>,
        pusher: MockMessagePusher,
    ) -> HeartbeatMonitor {
        HeartbeatMonitor::new(registry, Arc::new(pusher), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_first_sweep_probes_and_spares_everyone() {
        // given (precondition): one fresh connection
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let id = ConnectionId::generate();
        registry.register(id).await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_probe()
            .times(1)
            .returning(|_| Ok(()));
        pusher.expect_close().times(0);
        let monitor = monitor(registry, pusher);

        // when (operation):
        monitor.sweep().await;

        // then (expected result): expectations verified on drop
    }

    #[tokio::test]
    async fn test_silent_connection_is_closed_on_the_second_sweep() {
        // given (precondition): a connection that never pongs
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let id = ConnectionId::generate();
        registry.register(id).await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_probe().times(1).returning(|_| Ok(()));
        pusher
            .expect_close()
            .withf(move |closed| closed == &id)
            .times(1)
            .return_const(());
        let monitor = monitor(registry, pusher);

        // when (operation): two sweeps, no pulse in between
        monitor.sweep().await;
        monitor.sweep().await;

        // then (expected result): exactly one close, for that connection
    }

    #[tokio::test]
    async fn test_pulse_between_sweeps_keeps_the_connection() {
        // given (precondition):
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let id = ConnectionId::generate();
        registry.register(id).await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_probe().times(3).returning(|_| Ok(()));
        pusher.expect_close().times(0);
        let monitor = monitor(registry, pusher);

        // when (operation): the pong always arrives in time
        for _ in 0..3 {
            monitor.sweep().await;
            monitor.pulse(&id).await;
        }

        // then (expected result): probed every round, never closed
    }

    #[tokio::test]
    async fn test_failed_probe_dispatch_terminates_immediately() {
        // given (precondition): the sink rejects the probe
        let registry = Arc::new(InMemoryRoomRegistry::new(50));
        let id = ConnectionId::generate();
        registry.register(id).await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_probe()
            .times(1)
            .returning(|_| Err(MessagePushError::PushFailed("sink gone".to_string())));
        pusher.expect_close().times(1).return_const(());
        let monitor = monitor(registry, pusher);

        // when (operation):
        monitor.sweep().await;

        // then (expected result): closed on the very first sweep
    }
}
