//! Trick play: follow-suit enforcement and winner computation.

use crate::domain::cards_logic::{card_beats, counts_as_lead, hand_has_lead};
use crate::domain::cards_types::Card;
use crate::domain::state::{
    active_count, next_seat_where, require_trump, require_turn, Phase, SeatState, TableState,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether this play completed a trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<usize>,
    /// Whether this play finished the hand.
    pub hand_over: bool,
}

/// Compute legal cards the seat may play, independent of turn enforcement.
pub fn legal_moves(state: &TableState, who: usize) -> Vec<Card> {
    if state.phase != Phase::Play {
        return Vec::new();
    }
    let hand = &state.seats[who].hand;
    if hand.is_empty() {
        return Vec::new();
    }

    if let Some(lead) = state.trick_lead {
        if hand_has_lead(hand, lead, state.trump) {
            let mut v: Vec<Card> = hand
                .iter()
                .copied()
                .filter(|c| counts_as_lead(*c, lead, state.trump))
                .collect();
            v.sort();
            return v;
        }
    }

    let mut any = hand.clone();
    any.sort();
    any
}

/// Play a card into the current trick, enforcing turn, suit-following, and phase.
pub fn play_card(
    state: &mut TableState,
    who: usize,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if state.phase != Phase::Play {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    let turn = require_turn(state, "play_card")?;
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }

    // Card in hand (immutable check first to avoid borrow conflicts)
    let pos_opt = state.seats[who].hand.iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    };

    // Suit following check using an immutable borrow only
    let legal = legal_moves(state, who);
    if !legal.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            "Must follow suit",
        ));
    }

    // On first play, fix the lead; the Weli leads the trump suit.
    if state.trick_plays.is_empty() {
        let lead = match card {
            Card::Suited { suit, .. } => suit,
            Card::Weli => require_trump(state, "play_card lead")?,
        };
        state.trick_lead = Some(lead);
    }

    let removed = state.seats[who].hand.remove(pos);
    state.trick_plays.push((who, removed));
    state.turn = next_seat_where(&state.seats, who, can_play);

    let winner = complete_trick_if_full(state);
    Ok(PlayCardResult {
        trick_completed: winner.is_some(),
        trick_winner: winner,
        hand_over: state.phase == Phase::HandOver,
    })
}

/// Resolve the current trick winner among the cards played so far.
pub fn resolve_current_trick(state: &TableState) -> Option<usize> {
    if state.trick_plays.is_empty() {
        return None;
    }
    let lead = state.trick_lead?;

    let mut best_idx = 0usize;
    for i in 1..state.trick_plays.len() {
        let (_, card_i) = state.trick_plays[i];
        let (_, card_best) = state.trick_plays[best_idx];
        if card_beats(card_i, card_best, lead, state.trump) {
            best_idx = i;
        }
    }
    Some(state.trick_plays[best_idx].0)
}

/// An exchange deficit can leave a seat short of cards, so rotation and
/// trick completion go by "active and still holding cards", not by a flat
/// active-seat count.
pub(crate) fn can_play(seat: &SeatState) -> bool {
    seat.active() && !seat.hand.is_empty()
}

/// Whether every active seat that can still contribute has played.
fn trick_is_full(state: &TableState) -> bool {
    if state.trick_plays.is_empty() {
        return false;
    }
    !state.seats.iter().enumerate().any(|(i, s)| {
        can_play(s) && !state.trick_plays.iter().any(|(who, _)| *who == i)
    })
}

/// Complete the trick once every active seat has played into it. Also used
/// when a seat vacates mid-trick and the remaining plays already fill it.
pub(crate) fn complete_trick_if_full(state: &mut TableState) -> Option<usize> {
    if active_count(&state.seats) == 0 || !trick_is_full(state) {
        return None;
    }
    let winner = resolve_current_trick(state)?;

    state.seats[winner].tricks_won += 1;
    let cards: Vec<Card> = state.trick_plays.drain(..).map(|(_, c)| c).collect();
    state.taken.extend(cards);
    state.trick_lead = None;
    // A vacated or emptied winner cannot lead; the next seat that can does.
    state.turn = if can_play(&state.seats[winner]) {
        Some(winner)
    } else {
        next_seat_where(&state.seats, winner, can_play)
    };

    if state
        .seats
        .iter()
        .filter(|s| s.active())
        .all(|s| s.hand.is_empty())
    {
        state.phase = Phase::HandOver;
        state.turn = None;
        state.actor = None;
    }
    Some(winner)
}
