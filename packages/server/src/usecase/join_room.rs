//! UseCase: route a join request.
//!
//! Owners always get a fresh room; guests take the second seat of their
//! target owner's waiting room, or found one and wait themselves. The
//! search-and-join runs as one registry call, so concurrent joins cannot
//! over-fill a waiting room.

use std::sync::Arc;

use parlor_shared::time::unix_timestamp_millis;

use crate::domain::{ConnectionId, JoinOutcome, MessagePusher, RoomRegistry, Timestamp, Username};
use crate::infrastructure::dto::websocket::{
    ChatMessageEvent, EventType, HistoryEvent, JoinedEvent, UserJoinedEvent, UserListEvent,
};

use super::disconnect_client::notify_departure;
use super::error::JoinRoomError;
use super::DispatchLock;

pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatch_lock: DispatchLock,
}

impl JoinRoomUseCase {
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

    /// Sanitize the requested names, route the connection to a room, and
    /// deliver the join event sequence: `joined` and `history` to the
    /// joiner, `user_list` to the whole room, and `user_joined` to the
    /// members that were already there.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        requested_name: Option<&str>,
        target_owner: Option<&str>,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let username = Username::sanitize(requested_name);
        let target = Username::sanitize_target(target_owner);
        let now = Timestamp::new(unix_timestamp_millis());

        // Held through the pushes: rooms must hear events in the order
        // the registry generated them.
        let _dispatch = self.dispatch_lock.lock().await;

        let outcome = self
            .registry
            .join(connection_id, username, target, now)
            .await?;

        // The old room hears about the switch before the new room hears
        // about the arrival.
        if let Some(departure) = &outcome.departure {
            notify_departure(self.message_pusher.as_ref(), departure).await;
        }

        let joined = JoinedEvent {
            r#type: EventType::Joined,
            room_id: outcome.room_id.to_string(),
            owner: outcome.owner.as_str().to_string(),
        };
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &serde_json::to_string(&joined).unwrap())
            .await
        {
            tracing::warn!("failed to send joined event to '{}': {}", connection_id, e);
        }

        let history = HistoryEvent {
            r#type: EventType::History,
            data: outcome
                .history
                .iter()
                .cloned()
                .map(ChatMessageEvent::from)
                .collect(),
        };
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &serde_json::to_string(&history).unwrap())
            .await
        {
            tracing::warn!("failed to send history to '{}': {}", connection_id, e);
        }

        let user_list = UserListEvent {
            r#type: EventType::UserList,
            users: outcome
                .users
                .iter()
                .map(|user| user.as_str().to_string())
                .collect(),
            room_id: outcome.room_id.to_string(),
            owner: outcome.owner.as_str().to_string(),
        };
        self.message_pusher
            .broadcast(
                outcome.members.clone(),
                &serde_json::to_string(&user_list).unwrap(),
            )
            .await;

        if !outcome.peers.is_empty() {
            let user_joined = UserJoinedEvent {
                r#type: EventType::UserJoined,
                username: outcome.username.as_str().to_string(),
            };
            self.message_pusher
                .broadcast(
                    outcome.peers.clone(),
                    &serde_json::to_string(&user_joined).unwrap(),
                )
                .await;
        }

        tracing::info!(
            "'{}' joined room '{}' (owner '{}')",
            outcome.username,
            outcome.room_id,
            outcome.owner
        );
        Ok(outcome)
    }
}
