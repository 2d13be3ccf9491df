//! Entities: connections, rooms, and chat records.

use std::collections::VecDeque;

use super::value_object::{ConnectionId, MessageText, RoomId, Timestamp, Username};

/// One connected client as the relay sees it.
///
/// The registry owns every `Connection`; rooms refer to members by
/// [`ConnectionId`] only.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    /// Display name, assigned on the first join.
    pub username: Username,
    /// Cleared by each heartbeat sweep, set again by a pulse.
    pub alive: bool,
    /// Current room membership, at most one at any instant.
    pub room: Option<RoomId>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            username: Username::placeholder(),
            alive: true,
            room: None,
        }
    }
}

/// A chat message retained in a room's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub username: Username,
    pub text: MessageText,
    pub ts: Timestamp,
}

/// A bounded chat session keyed by its owner's display name.
///
/// Identity and owner are immutable after creation; the member set and
/// history are not.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    /// Display name used to find this room.
    pub owner: Username,
    /// Join order is preserved so user lists read in arrival order.
    members: Vec<ConnectionId>,
    history: VecDeque<ChatRecord>,
    history_capacity: usize,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, owner: Username, created_at: Timestamp, history_capacity: usize) -> Self {
        Self {
            id,
            owner,
            members: Vec::new(),
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
            created_at,
        }
    }

    /// Add a member; already-present members are not duplicated.
    pub fn add_member(&mut self, id: ConnectionId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    pub fn remove_member(&mut self, id: &ConnectionId) {
        self.members.retain(|member| member != id);
    }

    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append to the history, evicting the oldest entries beyond the
    /// capacity bound.
    pub fn push_history(&mut self, record: ChatRecord) {
        self.history.push_back(record);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }

    pub fn history(&self) -> &VecDeque<ChatRecord> {
        &self.history
    }

    /// Oldest-first copy of the history, as replayed to new joiners.
    pub fn history_snapshot(&self) -> Vec<ChatRecord> {
        self.history.iter().cloned().collect()
    }
}
