//! UseCase: connection teardown.
//!
//! Runs for every ended socket task, whether the client closed cleanly,
//! errored out, or was evicted by the heartbeat.

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, RoomRegistry};
use crate::infrastructure::dto::websocket::{EventType, UserLeftEvent, UserListEvent};

use super::DispatchLock;

/// Removes a connection everywhere and tells its old room.
pub struct DisconnectClientUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatch_lock: DispatchLock,
}

impl DisconnectClientUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatch_lock: DispatchLock,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            dispatch_lock,
        }
    }

    pub async fn execute(&self, connection_id: ConnectionId) {
        let _dispatch = self.dispatch_lock.lock().await;
        let departure = self.registry.remove(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;

        if let Some(departure) = departure {
            notify_departure(self.message_pusher.as_ref(), &departure).await;
        }
        tracing::debug!("connection '{}' removed", connection_id);
    }
}

/// Broadcast `user_left` and a refreshed `user_list` to the members left
/// behind. Both fan-outs are no-ops for an emptied room.
pub(crate) async fn notify_departure(pusher: &dyn MessagePusher, departure: &Departure) {
    let left = UserLeftEvent {
        r#type: EventType::UserLeft,
        username: departure.username.as_str().to_string(),
    };
    pusher
        .broadcast(
            departure.remaining.clone(),
            &serde_json::to_string(&left).unwrap(),
        )
        .await;

    let list = UserListEvent {
        r#type: EventType::UserList,
        users: departure
            .users
            .iter()
            .map(|user| user.as_str().to_string())
            .collect(),
        room_id: departure.room_id.to_string(),
        owner: departure.owner.as_str().to_string(),
    };
    pusher
        .broadcast(
            departure.remaining.clone(),
            &serde_json::to_string(&list).unwrap(),
        )
        .await;

    if departure.room_deleted {
        tracing::info!("room '{}' emptied and deleted", departure.room_id);
    }
}
