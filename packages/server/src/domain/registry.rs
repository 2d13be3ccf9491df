//! The coordination core: rooms, connections, and the transitions
//! between them.
//!
//! All state lives in one aggregate so that a single lock can serialize
//! every transition. `find_joinable_room` and the join itself are one
//! step here, which is what keeps a waiting room from being filled past
//! two members by racing joins.

use std::collections::{BTreeMap, HashMap};

use super::entity::{ChatRecord, Connection, Room};
use super::error::{JoinError, SendError};
use super::value_object::{ConnectionId, MessageText, RoomId, Timestamp, Username};

/// Default bound of a room's history ring.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// What happened to the room a connection left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub owner: Username,
    /// Name the departing connection carried when it left.
    pub username: Username,
    /// Members remaining in the room, in join order.
    pub remaining: Vec<ConnectionId>,
    /// Display names of the remaining members.
    pub users: Vec<Username>,
    /// The room was deleted because its member set emptied.
    pub room_deleted: bool,
}

/// Result of routing a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Departure from a previous room, when the join switched rooms.
    pub departure: Option<Departure>,
    pub room_id: RoomId,
    pub owner: Username,
    /// Name the connection joined under.
    pub username: Username,
    /// History snapshot replayed to the joiner, oldest first.
    pub history: Vec<ChatRecord>,
    /// All members after the join, in join order.
    pub members: Vec<ConnectionId>,
    /// Display names of all members, in join order.
    pub users: Vec<Username>,
    /// Members that were already present before this join.
    pub peers: Vec<ConnectionId>,
}

/// Result of accepting a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOutcome {
    pub record: ChatRecord,
    /// Full room membership, sender included — the echo is deliberate.
    pub targets: Vec<ConnectionId>,
}

/// Result of a heartbeat sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Connections that produced no pulse since the previous sweep.
    pub expired: Vec<ConnectionId>,
    /// Connections to probe; their flags were cleared by this sweep.
    pub probed: Vec<ConnectionId>,
}

/// Read model for the room list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub owner: Username,
    pub users: Vec<Username>,
    pub created_at: Timestamp,
}

/// Read model for the room detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub id: RoomId,
    pub owner: Username,
    pub users: Vec<Username>,
    pub history_len: usize,
    pub created_at: Timestamp,
}

/// In-memory registry of rooms and connections.
///
/// The registry owns both maps; rooms reference connections by id only.
#[derive(Debug)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
    /// Keyed by the monotonic room id, so iteration follows creation
    /// order and `find_joinable_room` is a deterministic first match.
    rooms: BTreeMap<RoomId, Room>,
    next_room_id: u64,
    history_capacity: usize,
}

impl Registry {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            connections: HashMap::new(),
            rooms: BTreeMap::new(),
            next_room_id: 1,
            history_capacity,
        }
    }

    /// Track a newly accepted connection: alive, roomless, placeholder
    /// name.
    pub fn register(&mut self, id: ConnectionId) {
        self.connections.insert(id, Connection::new(id));
    }

    /// A liveness pulse from the client.
    pub fn mark_alive(&mut self, id: &ConnectionId) {
        if let Some(connection) = self.connections.get_mut(id) {
            connection.alive = true;
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn create_room(&mut self, owner: Username, created_at: Timestamp) -> RoomId {
        let id = RoomId::new(self.next_room_id);
        self.next_room_id += 1;
        self.rooms
            .insert(id, Room::new(id, owner, created_at, self.history_capacity));
        id
    }

    /// First room owned by `owner` where the owner side is still waiting
    /// alone, in creation order.
    fn find_joinable_room(&self, owner: &Username) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.owner == *owner && room.member_count() == 1)
            .map(|room| room.id)
    }

    /// Route a join request.
    ///
    /// Owners (no target, or a target equal to their own name) always get
    /// a fresh room. Guests join the first waiting room of their target
    /// owner, or found one in the owner's name and wait there themselves.
    /// Switching rooms runs full departure semantics on the old room
    /// before the new membership takes effect.
    pub fn join(
        &mut self,
        id: ConnectionId,
        username: Username,
        target_owner: Option<Username>,
        now: Timestamp,
    ) -> Result<JoinOutcome, JoinError> {
        {
            let connection = self
                .connections
                .get_mut(&id)
                .ok_or(JoinError::UnknownConnection)?;
            connection.username = username.clone();
        }

        let target = target_owner.filter(|owner| *owner != username);
        let room_id = match target {
            None => self.create_room(username.clone(), now),
            Some(owner) => match self.find_joinable_room(&owner) {
                Some(existing) => existing,
                None => self.create_room(owner, now),
            },
        };

        // Re-joining the current room is not a switch.
        let current = self.connections.get(&id).and_then(|c| c.room);
        let departure = if current.is_some() && current != Some(room_id) {
            self.leave(&id)
        } else {
            None
        };

        let (owner, history, members, peers) = {
            let room = self
                .rooms
                .get_mut(&room_id)
                .expect("room was created or found under this same lock");
            let peers: Vec<ConnectionId> = room
                .members()
                .iter()
                .copied()
                .filter(|member| member != &id)
                .collect();
            room.add_member(id);
            (
                room.owner.clone(),
                room.history_snapshot(),
                room.members().to_vec(),
                peers,
            )
        };

        if let Some(connection) = self.connections.get_mut(&id) {
            connection.room = Some(room_id);
        }

        let users = self.usernames(&members);
        Ok(JoinOutcome {
            departure,
            room_id,
            owner,
            username,
            history,
            members,
            users,
            peers,
        })
    }

    /// Remove a connection from its room. Returns what the remaining
    /// members need to hear, or `None` when the connection was roomless.
    pub fn leave(&mut self, id: &ConnectionId) -> Option<Departure> {
        let connection = self.connections.get_mut(id)?;
        let username = connection.username.clone();
        let room_id = connection.room.take()?;
        let Some(room) = self.rooms.get_mut(&room_id) else {
            // Stale reference: the room is already gone, nothing to announce.
            return None;
        };

        room.remove_member(id);
        let remaining = room.members().to_vec();
        let owner = room.owner.clone();
        let room_deleted = room.is_empty();
        if room_deleted {
            self.rooms.remove(&room_id);
        }

        let users = self.usernames(&remaining);
        Some(Departure {
            room_id,
            owner,
            username,
            remaining,
            users,
            room_deleted,
        })
    }

    /// Full disconnect: leave the current room, then forget the
    /// connection.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Departure> {
        let departure = self.leave(id);
        self.connections.remove(id);
        departure
    }

    /// Accept a chat message: record it in the room history and name the
    /// full membership as delivery targets.
    pub fn append_message(
        &mut self,
        id: &ConnectionId,
        text: MessageText,
        ts: Timestamp,
    ) -> Result<MessageOutcome, SendError> {
        let connection = self.connections.get(id).ok_or(SendError::NotJoined)?;
        let room_id = connection.room.ok_or(SendError::NotJoined)?;
        let username = connection.username.clone();
        let room = self.rooms.get_mut(&room_id).ok_or(SendError::RoomMissing)?;

        let record = ChatRecord { username, text, ts };
        room.push_history(record.clone());
        Ok(MessageOutcome {
            record,
            targets: room.members().to_vec(),
        })
    }

    /// One heartbeat sweep: report connections that missed a pulse since
    /// the previous sweep, and clear the flag on the rest so the next
    /// sweep can tell.
    pub fn sweep(&mut self) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        for connection in self.connections.values_mut() {
            if connection.alive {
                connection.alive = false;
                outcome.probed.push(connection.id);
            } else {
                outcome.expired.push(connection.id);
            }
        }
        outcome
    }

    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.rooms
            .values()
            .map(|room| RoomSummary {
                id: room.id,
                owner: room.owner.clone(),
                users: self.usernames(room.members()),
                created_at: room.created_at,
            })
            .collect()
    }

    pub fn room_detail(&self, id: &RoomId) -> Option<RoomDetail> {
        self.rooms.get(id).map(|room| RoomDetail {
            id: room.id,
            owner: room.owner.clone(),
            users: self.usernames(room.members()),
            history_len: room.history().len(),
            created_at: room.created_at,
        })
    }

    fn usernames(&self, members: &[ConnectionId]) -> Vec<Username> {
        members
            .iter()
            .filter_map(|member| self.connections.get(member))
            .map(|connection| connection.username.clone())
            .collect()
    }
}
