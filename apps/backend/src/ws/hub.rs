//! Room and connection registries for realtime fan-out.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::domain::state::TableState;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::ws::protocol::ServerMsg;

/// Outbound push into one session's mailbox.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Push(pub ServerMsg);

pub struct Member {
    pub seat: usize,
    pub name: String,
    recipient: Recipient<Push>,
}

/// One table plus the connections seated at it.
///
/// The mutex around the table is the per-table critical section: every
/// mutation and the projections broadcast for it happen under a single
/// acquisition, so no snapshot ever mixes pre- and post-mutation fields.
pub struct Room {
    pub name: String,
    pub table: Mutex<TableState>,
    members: DashMap<Uuid, Member>,
}

impl Room {
    pub(crate) fn new(name: &str, seat_count: usize, rng_seed: u64) -> Result<Self, DomainError> {
        Ok(Self {
            name: name.to_string(),
            table: Mutex::new(TableState::new(seat_count, rng_seed)?),
            members: DashMap::new(),
        })
    }

    pub fn register(&self, conn_id: Uuid, seat: usize, name: &str, recipient: Recipient<Push>) {
        self.members.insert(
            conn_id,
            Member {
                seat,
                name: name.to_string(),
                recipient,
            },
        );
    }

    pub fn unregister(&self, conn_id: Uuid) -> Option<Member> {
        self.members.remove(&conn_id).map(|(_, member)| member)
    }

    pub fn member_seats(&self) -> Vec<(Uuid, usize)> {
        self.members
            .iter()
            .map(|entry| (*entry.key(), entry.value().seat))
            .collect()
    }

    pub fn member_info(&self, conn_id: Uuid) -> Option<(usize, String)> {
        self.members
            .get(&conn_id)
            .map(|member| (member.seat, member.name.clone()))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Best-effort delivery: a slow consumer's full mailbox drops the newest
    /// update for that connection only.
    pub fn send_to(&self, conn_id: Uuid, msg: ServerMsg) {
        if let Some(member) = self.members.get(&conn_id) {
            if member.recipient.try_send(Push(msg)).is_err() {
                warn!(
                    room = %self.name,
                    conn_id = %conn_id,
                    "outbound mailbox full, dropping update"
                );
            }
        }
    }

    pub fn broadcast_each(&self, messages: Vec<(Uuid, ServerMsg)>) {
        for (conn_id, msg) in messages {
            self.send_to(conn_id, msg);
        }
    }
}

/// All live rooms in the process, keyed by room name.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn create(&self, name: &str, seat_count: usize) -> Result<Arc<Room>, DomainError> {
        match self.rooms.entry(name.to_string()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::RoomExists,
                format!("Room {name} already exists"),
            )),
            Entry::Vacant(slot) => {
                let room = Arc::new(Room::new(name, seat_count, rand::random())?);
                slot.insert(room.clone());
                Ok(room)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Room>> {
        self.rooms.get(name).map(|entry| entry.clone())
    }

    /// Drop a room once its last connection is gone.
    pub fn remove_if_empty(&self, name: &str) {
        self.rooms.remove_if(name, |_, room| room.member_count() == 0);
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
