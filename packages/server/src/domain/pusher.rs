//! Client-sink contract.
//!
//! The relay core never talks to sockets directly. A client is an
//! addressable sink that can receive serialized events, answer liveness
//! probes, and disappear at any time; this trait is that surface, and the
//! UI layer decides what a sink concretely is.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Frame pushed into a client's outbound queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// A serialized event to deliver as a text frame.
    Event(String),
    /// A liveness probe (WebSocket ping).
    Probe,
    /// Terminate the connection.
    Close,
}

/// Per-connection outbound queue handle.
pub type PusherChannel = mpsc::UnboundedSender<OutboundFrame>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Outbound delivery seam between the relay core and client sinks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Attach a newly accepted client's outbound queue.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Detach a client's outbound queue.
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Push a serialized event to one client.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Push a serialized event to every target, skipping sinks that are
    /// gone or no longer writable. Best-effort: no retry, no error.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str);

    /// Dispatch a liveness probe.
    async fn probe(&self, connection_id: &ConnectionId) -> Result<(), MessagePushError>;

    /// Terminate the client's connection.
    async fn close(&self, connection_id: &ConnectionId);
}
