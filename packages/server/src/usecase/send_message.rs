//! UseCase: accept and fan out a chat message.

use std::sync::Arc;

use parlor_shared::time::unix_timestamp_millis;

use crate::domain::{ConnectionId, MessagePusher, MessageText, RoomRegistry, Timestamp};
use crate::infrastructure::dto::websocket::{ChatMessageEvent, ErrorEvent, EventType};

use super::DispatchLock;
use super::error::SendMessageError;

pub struct SendMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatch_lock: DispatchLock,
}

impl SendMessageUseCase {
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

    /// Truncate, record, and echo the message to the sender's whole room.
    /// On failure the sender — and only the sender — gets an `error`
    /// event carrying the rejection reason.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        raw_text: Option<&str>,
    ) -> Result<(), SendMessageError> {
        let text = MessageText::sanitize(raw_text);
        let ts = Timestamp::new(unix_timestamp_millis());

        // Held through the broadcast so history order and delivery order
        // cannot diverge.
        let _dispatch = self.dispatch_lock.lock().await;

        match self.registry.append_message(&connection_id, text, ts).await {
            Ok(outcome) => {
                let event = ChatMessageEvent::from(outcome.record);
                self.message_pusher
                    .broadcast(outcome.targets, &serde_json::to_string(&event).unwrap())
                    .await;
                Ok(())
            }
            Err(err) => {
                let err: SendMessageError = err.into();
                let event = ErrorEvent {
                    r#type: EventType::Error,
                    message: err.to_string(),
                };
                if let Err(push_err) = self
                    .message_pusher
                    .push_to(&connection_id, &serde_json::to_string(&event).unwrap())
                    .await
                {
                    tracing::warn!(
                        "failed to send error event to '{}': {}",
                        connection_id,
                        push_err
                    );
                }
                Err(err)
            }
        }
    }
}
