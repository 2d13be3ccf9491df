//! Domain error taxonomy.
//!
//! Every failure here is local to one connection; none of them can
//! affect other rooms or connections.

use thiserror::Error;

/// Failure to route a join request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// The connection was never registered, or was already reclaimed.
    #[error("unknown connection")]
    UnknownConnection,
}

/// Failure to accept a chat message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The sender has not joined a room yet.
    #[error("not joined to any room")]
    NotJoined,
    /// The sender's room reference no longer resolves.
    #[error("room does not exist")]
    RoomMissing,
}
