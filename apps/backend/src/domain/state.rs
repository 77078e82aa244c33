//! Shared table state: seats, phases, and seat-rotation helpers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cards_types::{Card, Suit};
use crate::domain::hand;
use crate::domain::rules::{EXCHANGE_MAX, MAX_SEATS, MIN_SEATS};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

/// Game progression phases within one hand, in strict order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Seat after the dealer chooses to cut or knock.
    Start,
    /// Cut card revealed to the first bidder; waiting for the deal.
    Cut,
    /// Seats bid or pass in turn order.
    Bidding,
    /// Winning bidder selects the trump suit.
    PickTrump,
    /// Seats replace cards from the talon/swamp, stay home, or decline.
    Exchange,
    /// Trick play, led by the winning bidder.
    Play,
    /// Hand complete; waiting for new_hand.
    HandOver,
}

/// Start-phase decision by the first bidder.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartChoice {
    Cut,
    /// Doubles the stakes for this hand before the cut is revealed.
    Knock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub conn_id: Uuid,
    pub name: String,
}

/// One player slot at the table.
#[derive(Debug, Clone, Default)]
pub struct SeatState {
    pub player: Option<Player>,
    pub hand: Vec<Card>,
    /// Out of the current auction.
    pub passed: bool,
    /// Has taken its exchange-phase action.
    pub acted: bool,
    /// Opted out of trick play for this hand.
    pub stayed: bool,
    pub tricks_won: u8,
}

impl SeatState {
    pub fn occupied(&self) -> bool {
        self.player.is_some()
    }

    /// Occupied and playing this hand.
    pub fn active(&self) -> bool {
        self.occupied() && !self.stayed
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.passed = false;
        self.acted = false;
        self.stayed = false;
        self.tricks_won = 0;
    }
}

/// The per-table aggregate. All mutation happens inside the owning room's
/// critical section; nothing here is thread-safe on its own.
#[derive(Debug, Clone)]
pub struct TableState {
    pub seats: Vec<SeatState>,
    pub phase: Phase,
    pub dealer: usize,
    /// First occupied seat after the dealer; opens the hand and sees the cut.
    pub first_bidder: usize,
    /// Seat whose action is awaited during start/cut/bidding/pick_trump/exchange.
    pub actor: Option<usize>,
    /// Seat whose card-play is awaited during the play phase.
    pub turn: Option<usize>,
    pub best_bid: u8,
    pub best_by: Option<usize>,
    pub round_double: bool,
    /// Undealt shuffled-and-cut deck; drained into hands and talon by the deal.
    pub deck: Vec<Card>,
    pub talon: Vec<Card>,
    pub swamp: Vec<Card>,
    pub swamp_shuffled: bool,
    /// Cards won in completed tricks.
    pub taken: Vec<Card>,
    pub exchange_max: u8,
    /// Bottom card of the cut packet, visible to the first bidder only.
    pub cut_peek: Option<Card>,
    pub trick_plays: Vec<(usize, Card)>,
    pub trick_lead: Option<Suit>,
    pub trump: Option<Suit>,
    pub rng_seed: u64,
    pub hand_no: u32,
}

impl TableState {
    pub fn new(seat_count: usize, rng_seed: u64) -> Result<Self, DomainError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seat_count) {
            return Err(DomainError::validation(
                ValidationKind::Other,
                format!("Seat count must be {MIN_SEATS}..={MAX_SEATS}, got {seat_count}"),
            ));
        }
        let mut state = Self {
            seats: (0..seat_count).map(|_| SeatState::default()).collect(),
            phase: Phase::Start,
            dealer: 0,
            first_bidder: 1 % seat_count,
            actor: None,
            turn: None,
            best_bid: 0,
            best_by: None,
            round_double: false,
            deck: Vec::new(),
            talon: Vec::new(),
            swamp: Vec::new(),
            swamp_shuffled: false,
            taken: Vec::new(),
            exchange_max: EXCHANGE_MAX,
            cut_peek: None,
            trick_plays: Vec::new(),
            trick_lead: None,
            trump: None,
            rng_seed,
            hand_no: 0,
        };
        hand::setup_hand(&mut state);
        Ok(state)
    }

    /// Seat a player, preferring `want_seat` when given.
    pub fn join(
        &mut self,
        conn_id: Uuid,
        name: &str,
        want_seat: Option<usize>,
    ) -> Result<usize, DomainError> {
        let seat = match want_seat {
            Some(i) => {
                if i >= self.seats.len() {
                    return Err(DomainError::not_found(
                        NotFoundKind::Seat,
                        format!("No seat {i} at this table"),
                    ));
                }
                if self.seats[i].occupied() {
                    return Err(DomainError::conflict(
                        ConflictKind::SeatTaken,
                        format!("Seat {i} is taken"),
                    ));
                }
                i
            }
            None => self
                .seats
                .iter()
                .position(|s| !s.occupied())
                .ok_or_else(|| {
                    DomainError::conflict(ConflictKind::RoomFull, "No free seat at this table")
                })?,
        };
        self.seats[seat].player = Some(Player {
            conn_id,
            name: name.to_string(),
        });
        match self.phase {
            Phase::Start => hand::recompute_first_bidder(self),
            // Joining before the deal still gets cards.
            Phase::Cut => {}
            // A hand is live: the seat sits this one out entirely.
            _ => {
                self.seats[seat].stayed = true;
                self.seats[seat].acted = true;
                self.seats[seat].passed = true;
            }
        }
        Ok(seat)
    }
}

/// Next seat after `from` (wrapping) satisfying `pred`, if any.
///
/// Single source of truth for "who acts next": bidding skips passed seats,
/// exchange skips seats that already acted, trick play skips stayed and
/// vacant seats, and the dealer rotation skips nothing.
pub fn next_seat_where<F>(seats: &[SeatState], from: usize, pred: F) -> Option<usize>
where
    F: Fn(&SeatState) -> bool,
{
    let n = seats.len();
    (1..=n).map(|step| (from + step) % n).find(|&i| pred(&seats[i]))
}

pub fn occupied_count(seats: &[SeatState]) -> usize {
    seats.iter().filter(|s| s.occupied()).count()
}

pub fn active_count(seats: &[SeatState]) -> usize {
    seats.iter().filter(|s| s.active()).count()
}

/// Seats still contesting the auction.
pub fn unpassed_seats(seats: &[SeatState]) -> Vec<usize> {
    seats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.occupied() && !s.passed)
        .map(|(i, _)| i)
        .collect()
}

pub fn require_actor(state: &TableState, ctx: &'static str) -> Result<usize, DomainError> {
    state.actor.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: actor must be set ({ctx})"))
    })
}

pub fn require_turn(state: &TableState, ctx: &'static str) -> Result<usize, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: turn must be set ({ctx})"))
    })
}

pub fn require_trump(state: &TableState, ctx: &'static str) -> Result<Suit, DomainError> {
    state.trump.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: trump must be set ({ctx})"))
    })
}

/// Every card the table currently tracks, across all locations. After the
/// deal this must always be the full 33-card deck.
pub fn card_census(state: &TableState) -> Vec<Card> {
    let mut cards = Vec::new();
    cards.extend(state.deck.iter().copied());
    for seat in &state.seats {
        cards.extend(seat.hand.iter().copied());
    }
    cards.extend(state.talon.iter().copied());
    cards.extend(state.swamp.iter().copied());
    cards.extend(state.taken.iter().copied());
    cards.extend(state.trick_plays.iter().map(|(_, c)| *c));
    cards
}
