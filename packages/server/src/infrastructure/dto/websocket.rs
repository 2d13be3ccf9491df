//! WebSocket wire protocol.
//!
//! Inbound frames are a tagged enum: anything that fails to parse —
//! malformed JSON or an unrecognized `type` — is dropped without a
//! reply. Outbound events each carry an explicit `type` tag.

use serde::{Deserialize, Serialize};

/// Client→server frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Join a room, optionally targeting another owner's room.
    Join {
        #[serde(default)]
        username: Option<String>,
        #[serde(default, rename = "targetOwner")]
        target_owner: Option<String>,
    },
    /// Send a chat message to the current room.
    Message {
        #[serde(default)]
        text: Option<String>,
    },
}

/// Tag carried by every server→client event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Joined,
    History,
    UserList,
    UserJoined,
    UserLeft,
    Message,
    Error,
}

/// A chat message event; also the shape history entries replay in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageEvent {
    pub r#type: EventType,
    pub username: String,
    pub text: String,
    pub ts: i64,
}

/// Confirmation of a completed join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedEvent {
    pub r#type: EventType,
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub owner: String,
}

/// History snapshot replayed to a new member, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub r#type: EventType,
    pub data: Vec<ChatMessageEvent>,
}

/// Current membership of a room, in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListEvent {
    pub r#type: EventType,
    pub users: Vec<String>,
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub owner: String,
}

/// A member arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserJoinedEvent {
    pub r#type: EventType,
    pub username: String,
}

/// A member departed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLeftEvent {
    pub r#type: EventType,
    pub username: String,
}

/// A request was rejected; delivered to the offending sender only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub r#type: EventType,
    pub message: String,
}
