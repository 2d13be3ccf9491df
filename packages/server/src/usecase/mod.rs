//! Application operations: one struct per relay transition.
//!
//! The mutating operations (join, message, disconnect) share a
//! [`DispatchLock`] held from registry mutation through outbound
//! enqueueing, so delivery order within a room always matches the order
//! events were generated in.

use std::sync::Arc;

use tokio::sync::Mutex;

mod connect_client;
mod disconnect_client;
mod error;
mod get_rooms;
mod heartbeat;
mod join_room;
mod send_message;
#[cfg(test)]
pub(crate) mod testing;

/// Serializes event generation and outbound enqueueing across the
/// mutating usecases — the relay's single logical event loop.
pub type DispatchLock = Arc<Mutex<()>>;

/// A fresh, unheld [`DispatchLock`].
pub fn dispatch_lock() -> DispatchLock {
    Arc::new(Mutex::new(()))
}

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{GetRoomDetailError, JoinRoomError, SendMessageError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use heartbeat::{DEFAULT_HEARTBEAT_INTERVAL_MS, HeartbeatMonitor};
pub use join_room::JoinRoomUseCase;
pub use send_message::SendMessageUseCase;
