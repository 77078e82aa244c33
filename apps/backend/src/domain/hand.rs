//! Hand lifecycle: the opening choice, the cut, the deal, hand resets, and
//! seat vacation while a hand is live.

use crate::domain::auction;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::deck::{cut_deck, full_deck, shuffle_with_seed};
use crate::domain::exchange;
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, MIN_SEATS};
use crate::domain::seed_derivation::{derive_cut_seed, derive_shuffle_seed};
use crate::domain::state::{
    card_census, next_seat_where, occupied_count, Phase, SeatState, StartChoice, TableState,
};
use crate::domain::tricks;
use crate::errors::domain::{DomainError, ValidationKind};

/// Reset all per-hand fields and prepare the next deck: shuffle, cut, and
/// remember the revealed cut card for the first bidder.
pub(crate) fn setup_hand(state: &mut TableState) {
    for seat in &mut state.seats {
        seat.reset_for_hand();
    }
    state.best_bid = 0;
    state.best_by = None;
    state.round_double = false;
    state.talon.clear();
    state.swamp.clear();
    state.swamp_shuffled = false;
    state.taken.clear();
    state.trick_plays.clear();
    state.trick_lead = None;
    state.trump = None;
    state.turn = None;

    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, derive_shuffle_seed(state.rng_seed, state.hand_no));
    let peek = cut_deck(&mut deck, derive_cut_seed(state.rng_seed, state.hand_no));
    state.cut_peek = Some(peek);
    state.deck = deck;

    state.phase = Phase::Start;
    recompute_first_bidder(state);
}

/// While the hand has not been opened, the first bidder follows occupancy.
pub(crate) fn recompute_first_bidder(state: &mut TableState) {
    state.first_bidder = next_seat_where(&state.seats, state.dealer, SeatState::occupied)
        .unwrap_or((state.dealer + 1) % state.seats.len());
    state.actor = Some(state.first_bidder);
}

/// The first bidder opens the hand: plain cut, or knock to double the stakes.
pub fn start_choice(
    state: &mut TableState,
    seat: usize,
    choice: StartChoice,
) -> Result<(), DomainError> {
    if state.phase != Phase::Start {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    if occupied_count(&state.seats) < MIN_SEATS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            "Not enough players seated",
        ));
    }
    if seat != state.first_bidder {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Only the first bidder opens the hand",
        ));
    }
    if choice == StartChoice::Knock {
        state.round_double = true;
    }
    state.phase = Phase::Cut;
    state.actor = Some(state.first_bidder);
    Ok(())
}

/// The first bidder triggers the deal after seeing the cut card.
pub fn cut_proceed(state: &mut TableState, seat: usize) -> Result<(), DomainError> {
    if state.phase != Phase::Cut {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    if occupied_count(&state.seats) < MIN_SEATS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            "Not enough players seated",
        ));
    }
    if seat != state.first_bidder {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Only the first bidder triggers the deal",
        ));
    }

    // A revealed Weli stays with the first bidder, outside the normal deal.
    let weli_reserved = state.cut_peek == Some(Card::Weli);
    if weli_reserved {
        state.deck.retain(|c| *c != Card::Weli);
    }

    let n = state.seats.len();
    for step in 1..=n {
        let idx = (state.dealer + step) % n;
        if !state.seats[idx].occupied() {
            continue;
        }
        let hand: Vec<Card> = state.deck.drain(..HAND_SIZE).collect();
        state.seats[idx].hand = hand;
    }

    if weli_reserved {
        let fb = state.first_bidder;
        state.seats[fb].hand.push(Card::Weli);
        if state.seats[fb].hand.len() > HAND_SIZE {
            // Over-dealt: the last dealt plain card returns to the deck top.
            let back = state.seats[fb].hand.remove(HAND_SIZE - 1);
            state.deck.insert(0, back);
        }
    }

    state.talon = std::mem::take(&mut state.deck);
    debug_assert_eq!(card_census(state).len(), DECK_SIZE);

    state.phase = Phase::Bidding;
    state.actor = Some(state.first_bidder);
    Ok(())
}

/// Reset for the next hand: dealer advances one seat (wrapping), everything
/// per-hand is cleared, and a fresh deck is shuffled and cut.
pub fn new_hand(state: &mut TableState) -> Result<(), DomainError> {
    if !matches!(state.phase, Phase::HandOver | Phase::Start) {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "A hand is still in progress",
        ));
    }
    state.hand_no += 1;
    state.dealer = (state.dealer + 1) % state.seats.len();
    setup_hand(state);
    Ok(())
}

/// Remove a player from its seat while keeping the hand playable: cards go
/// to the swamp and any pointer at the seat advances past it.
pub fn vacate_seat(state: &mut TableState, seat: usize) {
    if seat >= state.seats.len() || !state.seats[seat].occupied() {
        return;
    }
    state.seats[seat].player = None;
    let hand = std::mem::take(&mut state.seats[seat].hand);
    state.swamp.extend(hand);

    match state.phase {
        Phase::Start => recompute_first_bidder(state),
        Phase::Cut => {
            if state.first_bidder == seat {
                recompute_first_bidder(state);
            }
        }
        Phase::Bidding => {
            // A vacating bidder counts as passed.
            state.seats[seat].passed = true;
            if state.actor == Some(seat) {
                state.actor =
                    next_seat_where(&state.seats, seat, |s| s.occupied() && !s.passed);
            }
            auction::resolve_if_settled(state);
        }
        Phase::PickTrump => {
            if state.best_by == Some(seat) {
                // Declarer left before picking: fall back to the hearts call.
                state.trump = Some(Suit::Hearts);
                exchange::enter_exchange(state);
            }
        }
        Phase::Exchange => {
            // A vacating exchanger counts as acted.
            state.seats[seat].acted = true;
            if state.actor == Some(seat) {
                exchange::advance_exchange(state, seat);
            }
        }
        Phase::Play => {
            if state.turn == Some(seat) {
                state.turn = next_seat_where(&state.seats, seat, tricks::can_play);
            }
            // The departed seat may have been the last one missing from the
            // current trick.
            tricks::complete_trick_if_full(state);
        }
        Phase::HandOver => {}
    }
}
