//! Domain model: value objects, entities, and the coordination core.

mod entity;
mod error;
mod pusher;
mod registry;
mod repository;
mod value_object;

pub use entity::{ChatRecord, Connection, Room};
pub use error::{JoinError, SendError};
pub use pusher::{MessagePushError, MessagePusher, OutboundFrame, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use registry::{
    DEFAULT_HISTORY_CAPACITY, Departure, JoinOutcome, MessageOutcome, Registry, RoomDetail,
    RoomSummary, SweepOutcome,
};
pub use repository::RoomRegistry;
pub use value_object::{
    ConnectionId, MAX_MESSAGE_CHARS, MAX_USERNAME_CHARS, MessageText, PLACEHOLDER_USERNAME,
    RoomId, Timestamp, Username,
};
