//! Registry seam between the relay core and its callers.
//!
//! Callers never reach the aggregate directly: every operation on this
//! trait is a single atomic step relative to all others. That atomicity
//! is load-bearing — `join` performs the room search and the membership
//! mutation in one call, so two racing joins cannot over-fill a waiting
//! room.

use async_trait::async_trait;

use super::error::{JoinError, SendError};
use super::registry::{Departure, JoinOutcome, MessageOutcome, RoomDetail, RoomSummary, SweepOutcome};
use super::value_object::{ConnectionId, MessageText, RoomId, Timestamp, Username};

/// The room/connection registry as seen by the usecase layer.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Track a newly accepted connection.
    async fn register(&self, id: ConnectionId);

    /// Record a liveness pulse.
    async fn mark_alive(&self, id: &ConnectionId);

    /// Route a join request; see [`crate::domain::Registry::join`].
    async fn join(
        &self,
        id: ConnectionId,
        username: Username,
        target_owner: Option<Username>,
        now: Timestamp,
    ) -> Result<JoinOutcome, JoinError>;

    /// Record a chat message and name its delivery targets.
    async fn append_message(
        &self,
        id: &ConnectionId,
        text: MessageText,
        ts: Timestamp,
    ) -> Result<MessageOutcome, SendError>;

    /// Disconnect: leave the current room and forget the connection.
    async fn remove(&self, id: &ConnectionId) -> Option<Departure>;

    /// One heartbeat sweep over all connections.
    async fn sweep(&self) -> SweepOutcome;

    /// Number of tracked connections.
    async fn connection_count(&self) -> usize;

    /// Read model for the room list endpoint.
    async fn room_summaries(&self) -> Vec<RoomSummary>;

    /// Read model for the room detail endpoint.
    async fn room_detail(&self, id: &RoomId) -> Option<RoomDetail>;
}
