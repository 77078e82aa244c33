//! Bidding auction: strictly increasing bids, permanent passes, the hearts
//! call, and trump selection by the winner.

use crate::domain::cards_types::Suit;
use crate::domain::exchange;
use crate::domain::rules::{HEARTS_CALL_BID, MAX_BID, MIN_BID};
use crate::domain::state::{
    next_seat_where, require_actor, unpassed_seats, Phase, TableState,
};
use crate::errors::domain::{DomainError, ValidationKind};

pub fn bid(state: &mut TableState, seat: usize, value: u8) -> Result<(), DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    let actor = require_actor(state, "bid")?;
    if actor != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    if state.seats[seat].passed {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPassed,
            "Seat already passed",
        ));
    }
    if value > MAX_BID {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid above table maximum {MAX_BID}"),
        ));
    }
    if value <= state.best_bid {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "Bid must exceed the current best bid",
        ));
    }
    if value < MIN_BID && !(value == HEARTS_CALL_BID && state.best_bid == 0) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "A bid of 1 is only legal as the opening hearts call",
        ));
    }

    state.best_bid = value;
    state.best_by = Some(seat);
    if value == HEARTS_CALL_BID {
        // The hearts call fixes trump immediately.
        state.trump = Some(Suit::Hearts);
    }
    advance_auction_actor(state, seat);
    Ok(())
}

pub fn pass(state: &mut TableState, seat: usize) -> Result<(), DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    let actor = require_actor(state, "pass")?;
    if actor != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    if state.seats[seat].passed {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPassed,
            "Seat already passed",
        ));
    }

    state.seats[seat].passed = true;
    advance_auction_actor(state, seat);
    resolve_if_settled(state);
    Ok(())
}

pub fn pick_trump(state: &mut TableState, seat: usize, trump: Suit) -> Result<(), DomainError> {
    if state.phase != Phase::PickTrump {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    if state.best_by != Some(seat) {
        return Err(DomainError::validation(
            ValidationKind::NotDeclarer,
            "Only the winning bidder picks trump",
        ));
    }
    state.trump = Some(trump);
    exchange::enter_exchange(state);
    Ok(())
}

fn advance_auction_actor(state: &mut TableState, from: usize) {
    state.actor = next_seat_where(&state.seats, from, |s| s.occupied() && !s.passed);
}

/// End the auction once exactly one unpassed seat remains.
///
/// Also called when a seat vacates mid-auction, which can settle it the same
/// way a pass does.
pub(crate) fn resolve_if_settled(state: &mut TableState) {
    if state.phase != Phase::Bidding {
        return;
    }
    let unpassed = unpassed_seats(&state.seats);
    if unpassed.len() != 1 {
        return;
    }
    let remaining = unpassed[0];
    state.actor = Some(remaining);

    let best_by = match state.best_by {
        Some(b) if state.seats[b].occupied() => b,
        Some(_) => {
            // The best bidder vacated mid-auction; the remaining seat
            // inherits the standing bid.
            state.best_by = Some(remaining);
            remaining
        }
        None => {
            // Everyone passed without a single bid: the remaining seat is
            // declared in at the hearts call.
            state.best_bid = HEARTS_CALL_BID;
            state.best_by = Some(remaining);
            state.trump = Some(Suit::Hearts);
            exchange::enter_exchange(state);
            return;
        }
    };

    if best_by == remaining && state.best_bid == HEARTS_CALL_BID {
        // Won hearts call: trump is already hearts, no pick needed.
        exchange::enter_exchange(state);
        return;
    }

    state.phase = Phase::PickTrump;
    state.actor = Some(best_by);
}
