//! Applies client actions to a room's table under its critical section and
//! fans the per-seat projections out to every member.

use std::sync::Arc;

use actix::Recipient;
use uuid::Uuid;

use crate::domain::hand;
use crate::domain::snapshot::project_for_seat;
use crate::domain::state::TableState;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::ws::hub::{Push, Room, RoomRegistry};
use crate::ws::protocol::ServerMsg;

/// Explicit outcome of a game action against a table.
#[derive(Debug)]
pub enum Outcome {
    /// Mutation applied; every member received a fresh projection.
    Applied,
    /// Illegal action: no mutation, no broadcast, no reply. This reproduces
    /// the protocol's silent-rejection contract.
    Rejected(DomainError),
}

/// Run `mutate` inside the room's critical section; on success the per-seat
/// projections are built under the same lock and pushed after release.
pub fn apply<F>(room: &Room, mutate: F) -> Outcome
where
    F: FnOnce(&mut TableState) -> Result<(), DomainError>,
{
    let payloads = {
        let mut table = room.table.lock();
        if let Err(err) = mutate(&mut table) {
            return Outcome::Rejected(err);
        }
        build_payloads(room, &table)
    };
    room.broadcast_each(payloads);
    Outcome::Applied
}

/// Push the current state to every member, each seeing only its own hand.
pub fn broadcast_state(room: &Room) {
    let payloads = {
        let table = room.table.lock();
        build_payloads(room, &table)
    };
    room.broadcast_each(payloads);
}

fn build_payloads(room: &Room, table: &TableState) -> Vec<(Uuid, ServerMsg)> {
    room.member_seats()
        .into_iter()
        .map(|(conn_id, seat)| {
            (
                conn_id,
                ServerMsg::TableState {
                    room: room.name.clone(),
                    state: project_for_seat(table, Some(seat)),
                },
            )
        })
        .collect()
}

/// Seat a connection at a room. The caller acks the join before the first
/// projection goes out.
pub fn join_room(
    registry: &RoomRegistry,
    room_name: &str,
    conn_id: Uuid,
    name: &str,
    want_seat: Option<usize>,
    recipient: Recipient<Push>,
) -> Result<(Arc<Room>, usize), DomainError> {
    let room = registry.get(room_name).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Room, format!("Room {room_name} not found"))
    })?;
    let seat = room.table.lock().join(conn_id, name, want_seat)?;
    room.register(conn_id, seat, name, recipient);
    Ok((room, seat))
}

/// Free the connection's seat and tell the remaining members; the room is
/// dropped once its last connection is gone.
pub fn leave_room(registry: &RoomRegistry, room: &Arc<Room>, conn_id: Uuid) {
    let Some(member) = room.unregister(conn_id) else {
        return;
    };
    {
        let mut table = room.table.lock();
        hand::vacate_seat(&mut table, member.seat);
    }
    broadcast_state(room);
    registry.remove_if_empty(&room.name);
}

/// Room-scoped chat relay; no game state involved.
pub fn chat(room: &Room, conn_id: Uuid, text: String) {
    let Some((seat, name)) = room.member_info(conn_id) else {
        return;
    };
    let msg = ServerMsg::Chat { seat, name, text };
    for (member_conn, _) in room.member_seats() {
        room.send_to(member_conn, msg.clone());
    }
}
