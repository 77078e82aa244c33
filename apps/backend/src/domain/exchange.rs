//! Exchange phase: talon/swamp card replacement and staying home.

use crate::domain::cards_types::Card;
use crate::domain::deck::shuffle_with_seed;
use crate::domain::rules::NO_STAY_TRUMP;
use crate::domain::seed_derivation::derive_swamp_seed;
use crate::domain::state::{next_seat_where, require_actor, Phase, TableState};
use crate::domain::tricks;
use crate::errors::domain::{DomainError, ValidationKind};

fn guard(state: &TableState, seat: usize) -> Result<(), DomainError> {
    if state.phase != Phase::Exchange {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    let actor = require_actor(state, "exchange")?;
    if actor != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    Ok(())
}

/// Discard 1..=exchange_max owned cards and draw replacements, talon first,
/// then the lazily shuffled swamp. A deficit is left unreplenished.
pub fn exchange_cards(
    state: &mut TableState,
    seat: usize,
    cards: &[Card],
) -> Result<(), DomainError> {
    guard(state, seat)?;
    if cards.is_empty() || cards.len() > state.exchange_max as usize {
        return Err(DomainError::validation(
            ValidationKind::InvalidExchange,
            format!("Exchange 1..={} cards", state.exchange_max),
        ));
    }
    // Reject duplicates in the request; a hand never holds the same card twice.
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(DomainError::validation(
                ValidationKind::InvalidExchange,
                "Duplicate card in exchange request",
            ));
        }
        if !state.seats[seat].hand.contains(card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "Card not in hand",
            ));
        }
    }

    // Replacements are drawn before the discards hit the swamp, so a seat
    // never draws back its own discard within one exchange. Once both piles
    // run dry the deficit simply stands.
    let mut discards = Vec::with_capacity(cards.len());
    for card in cards {
        if let Some(pos) = state.seats[seat].hand.iter().position(|c| c == card) {
            discards.push(state.seats[seat].hand.remove(pos));
        }
    }
    for _ in 0..discards.len() {
        let Some(replacement) = draw_replacement(state) else {
            break;
        };
        state.seats[seat].hand.push(replacement);
    }
    state.swamp.extend(discards);

    state.seats[seat].acted = true;
    advance_exchange(state, seat);
    Ok(())
}

/// Opt out of trick play for this hand, keeping the dealt hand untouched.
pub fn stay_home(state: &mut TableState, seat: usize) -> Result<(), DomainError> {
    guard(state, seat)?;
    if state.best_by == Some(seat) {
        return Err(DomainError::validation(
            ValidationKind::StayHomeForbidden,
            "The declarer must play",
        ));
    }
    if state.trump == Some(NO_STAY_TRUMP) {
        return Err(DomainError::validation(
            ValidationKind::StayHomeForbidden,
            "Nobody stays home on a hearts round",
        ));
    }
    state.seats[seat].stayed = true;
    state.seats[seat].acted = true;
    advance_exchange(state, seat);
    Ok(())
}

/// Decline to exchange.
pub fn exchange_done(state: &mut TableState, seat: usize) -> Result<(), DomainError> {
    guard(state, seat)?;
    state.seats[seat].acted = true;
    advance_exchange(state, seat);
    Ok(())
}

fn draw_replacement(state: &mut TableState) -> Option<Card> {
    if !state.talon.is_empty() {
        return Some(state.talon.remove(0));
    }
    if state.swamp.is_empty() {
        return None;
    }
    if !state.swamp_shuffled {
        // The swamp is shuffled exactly once, the first time it is drawn from.
        let seed = derive_swamp_seed(state.rng_seed, state.hand_no);
        shuffle_with_seed(&mut state.swamp, seed);
        state.swamp_shuffled = true;
    }
    Some(state.swamp.remove(0))
}

/// Enter the exchange phase with the declarer acting first.
pub(crate) fn enter_exchange(state: &mut TableState) {
    state.phase = Phase::Exchange;
    let declarer = state.best_by.unwrap_or(state.first_bidder);
    state.actor = if state.seats[declarer].occupied() && !state.seats[declarer].acted {
        Some(declarer)
    } else {
        next_seat_where(&state.seats, declarer, |s| s.occupied() && !s.acted)
    };
    if state.actor.is_none() {
        enter_play(state);
    }
}

/// Move to the next occupied seat that has not acted, or start trick play.
pub(crate) fn advance_exchange(state: &mut TableState, from: usize) {
    state.actor = next_seat_where(&state.seats, from, |s| s.occupied() && !s.acted);
    if state.actor.is_none() {
        enter_play(state);
    }
}

/// Start trick play with the declarer leading the first trick.
pub(crate) fn enter_play(state: &mut TableState) {
    state.phase = Phase::Play;
    state.actor = None;
    let declarer = state.best_by.unwrap_or(state.first_bidder);
    state.turn = if tricks::can_play(&state.seats[declarer]) {
        Some(declarer)
    } else {
        next_seat_where(&state.seats, declarer, tricks::can_play)
    };
}
