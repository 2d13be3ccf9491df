//! UseCase error types.
//!
//! The `Display` texts of [`SendMessageError`] are user-visible: they are
//! the `message` field of the `error` event pushed back to the sender.

use thiserror::Error;

use crate::domain::{JoinError, SendError};

/// Join request failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("connection is not registered")]
    UnknownConnection,
}

impl From<JoinError> for JoinRoomError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::UnknownConnection => Self::UnknownConnection,
        }
    }
}

/// Chat message failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("you must join a room before sending messages")]
    NotJoined,
    #[error("room no longer exists")]
    RoomMissing,
}

impl From<SendError> for SendMessageError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::NotJoined => Self::NotJoined,
            SendError::RoomMissing => Self::RoomMissing,
        }
    }
}

/// Room detail lookup failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
