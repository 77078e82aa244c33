//! Per-seat projection of table state.
//!
//! Hidden information never leaves this module: a snapshot carries only the
//! viewer's own hand, and the cut card only for the seat allowed to see it.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::{Phase, TableState};

/// Public info about a single seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: usize,
    pub name: Option<String>,
    pub occupied: bool,
    pub hand_count: usize,
    pub tricks_won: u8,
    pub passed: bool,
    pub stayed: bool,
}

/// What one seat is allowed to see of the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub dealer: usize,
    pub first_bidder: usize,
    pub actor: Option<usize>,
    pub turn: Option<usize>,
    pub best_bid: u8,
    pub best_by: Option<usize>,
    pub round_double: bool,
    pub trump: Option<Suit>,
    pub lead: Option<Suit>,
    /// Cards played into the current trick, in play order.
    pub trick: Vec<(usize, Card)>,
    pub seats: Vec<SeatPublic>,
    /// The viewer's own hand; empty for non-seated viewers.
    pub hand: Vec<Card>,
    /// Revealed cut card; populated only for the first bidder during the cut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_peek: Option<Card>,
    pub talon_count: usize,
    pub swamp_count: usize,
    pub exchange_max: u8,
    pub hand_over: bool,
}

/// Entry point: produce what `viewer` may see of the current table state.
pub fn project_for_seat(state: &TableState, viewer: Option<usize>) -> TableSnapshot {
    let seats = state
        .seats
        .iter()
        .enumerate()
        .map(|(i, s)| SeatPublic {
            seat: i,
            name: s.player.as_ref().map(|p| p.name.clone()),
            occupied: s.occupied(),
            hand_count: s.hand.len(),
            tricks_won: s.tricks_won,
            passed: s.passed,
            stayed: s.stayed,
        })
        .collect();

    let hand = viewer
        .and_then(|v| state.seats.get(v))
        .map(|s| {
            let mut h = s.hand.clone();
            h.sort();
            h
        })
        .unwrap_or_default();

    let cut_peek = match (state.phase, viewer) {
        (Phase::Cut, Some(v)) if v == state.first_bidder => state.cut_peek,
        _ => None,
    };

    TableSnapshot {
        phase: state.phase,
        dealer: state.dealer,
        first_bidder: state.first_bidder,
        actor: state.actor,
        turn: state.turn,
        best_bid: state.best_bid,
        best_by: state.best_by,
        round_double: state.round_double,
        trump: state.trump,
        lead: state.trick_lead,
        trick: state.trick_plays.clone(),
        seats,
        hand,
        cut_peek,
        talon_count: state.talon.len(),
        swamp_count: state.swamp.len(),
        exchange_max: state.exchange_max,
        hand_over: state.phase == Phase::HandOver,
    }
}
