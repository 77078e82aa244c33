use crate::domain::auction::pick_trump;
use crate::domain::exchange::{exchange_cards, exchange_done, stay_home};
use crate::domain::state::{card_census, Phase};
use crate::domain::test_state_helpers::{advance_to_bidding, auction_to_declarer, make_table};
use crate::domain::{full_deck, Card, Suit, TableState};
use crate::errors::domain::{DomainError, ValidationKind};

/// 3 players, declarer seat 1, trump acorns, table in Exchange.
fn exchange_table() -> TableState {
    let mut state = make_table(3, &[0, 1, 2]);
    advance_to_bidding(&mut state);
    auction_to_declarer(&mut state, 2);
    pick_trump(&mut state, 1, Suit::Acorns).unwrap();
    assert_eq!(state.phase, Phase::Exchange);
    state
}

fn assert_census_whole(state: &TableState) {
    let mut census = card_census(state);
    census.sort();
    let mut reference = full_deck();
    reference.sort();
    assert_eq!(census, reference);
}

#[test]
fn declarer_acts_first() {
    let state = exchange_table();
    assert_eq!(state.actor, state.best_by);
}

#[test]
fn exchange_replaces_from_talon() {
    let mut state = exchange_table();
    let talon_before = state.talon.len();
    let swamp_before = state.swamp.len();
    let discarded: Vec<Card> = state.seats[1].hand[..2].to_vec();

    exchange_cards(&mut state, 1, &discarded).unwrap();

    assert_eq!(state.seats[1].hand.len(), 5);
    assert_eq!(state.talon.len(), talon_before - 2);
    assert_eq!(state.swamp.len(), swamp_before + 2);
    for card in &discarded {
        assert!(!state.seats[1].hand.contains(card));
        assert!(state.swamp.contains(card));
    }
    assert_census_whole(&state);
    // Acting moves the spotlight on.
    assert_eq!(state.actor, Some(2));
}

#[test]
fn talon_exhaustion_continues_from_shuffled_swamp() {
    let mut state = exchange_table();
    // Simulate a nearly drained talon: everything but one card has already
    // been discarded into the swamp by earlier exchanges.
    let rest: Vec<Card> = state.talon.split_off(1);
    state.swamp.extend(rest);
    assert!(!state.swamp_shuffled);

    let discarded: Vec<Card> = state.seats[1].hand[..3].to_vec();
    exchange_cards(&mut state, 1, &discarded).unwrap();

    // 1 from the talon, 2 from the swamp after its one-time shuffle.
    assert!(state.talon.is_empty());
    assert!(state.swamp_shuffled);
    assert_eq!(state.seats[1].hand.len(), 5);
    assert_census_whole(&state);
}

#[test]
fn deficit_is_left_unreplenished() {
    let mut state = exchange_table();
    // Both piles dry: park the talon with the won-tricks pile so every card
    // stays accounted for.
    let talon: Vec<Card> = state.talon.drain(..).collect();
    state.taken.extend(talon);
    assert!(state.swamp.is_empty());

    let discarded: Vec<Card> = state.seats[1].hand[..3].to_vec();
    exchange_cards(&mut state, 1, &discarded).unwrap();

    // Nothing to draw; the hand simply stays short.
    assert_eq!(state.seats[1].hand.len(), 2);
    assert_eq!(state.swamp.len(), 3);
    assert_census_whole(&state);
}

#[test]
fn own_discards_are_not_redrawn_in_the_same_exchange() {
    let mut state = exchange_table();
    let talon: Vec<Card> = state.talon.drain(..).collect();
    state.taken.extend(talon);

    let discarded: Vec<Card> = state.seats[1].hand[..2].to_vec();
    exchange_cards(&mut state, 1, &discarded).unwrap();
    for card in &discarded {
        assert!(!state.seats[1].hand.contains(card));
    }
}

#[test]
fn exchange_count_and_ownership_validated() {
    let mut state = exchange_table();
    let hand_before = state.seats[1].hand.clone();

    assert!(matches!(
        exchange_cards(&mut state, 1, &[]).unwrap_err(),
        DomainError::Validation(ValidationKind::InvalidExchange, _)
    ));

    // A card the seat does not hold.
    let foreign = state.seats[2].hand[0];
    assert!(!hand_before.contains(&foreign));
    assert!(matches!(
        exchange_cards(&mut state, 1, &[foreign]).unwrap_err(),
        DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));

    // Duplicate request.
    let own = hand_before[0];
    assert!(matches!(
        exchange_cards(&mut state, 1, &[own, own]).unwrap_err(),
        DomainError::Validation(ValidationKind::InvalidExchange, _)
    ));

    // Nothing moved.
    assert_eq!(state.seats[1].hand, hand_before);
    assert_census_whole(&state);
}

#[test]
fn only_the_actor_exchanges() {
    let mut state = exchange_table();
    let cards: Vec<Card> = state.seats[2].hand[..1].to_vec();
    assert!(matches!(
        exchange_cards(&mut state, 2, &cards).unwrap_err(),
        DomainError::Validation(ValidationKind::OutOfTurn, _)
    ));
}

#[test]
fn declarer_may_not_stay_home() {
    let mut state = exchange_table();
    assert!(matches!(
        stay_home(&mut state, 1).unwrap_err(),
        DomainError::Validation(ValidationKind::StayHomeForbidden, _)
    ));
}

#[test]
fn nobody_stays_home_on_a_hearts_round() {
    let mut state = make_table(3, &[0, 1, 2]);
    advance_to_bidding(&mut state);
    auction_to_declarer(&mut state, 1);
    assert_eq!(state.phase, Phase::Exchange);
    assert_eq!(state.trump, Some(Suit::Hearts));

    exchange_done(&mut state, 1).unwrap();
    assert!(matches!(
        stay_home(&mut state, 2).unwrap_err(),
        DomainError::Validation(ValidationKind::StayHomeForbidden, _)
    ));
}

#[test]
fn staying_home_keeps_the_hand_and_skips_play() {
    let mut state = exchange_table();
    exchange_done(&mut state, 1).unwrap();
    let hand_before = state.seats[2].hand.clone();
    stay_home(&mut state, 2).unwrap();
    assert!(state.seats[2].stayed);
    assert_eq!(state.seats[2].hand, hand_before);

    exchange_done(&mut state, 0).unwrap();
    assert_eq!(state.phase, Phase::Play);
    // Declarer leads; the stayed seat is never in rotation.
    assert_eq!(state.turn, Some(1));
}

#[test]
fn play_starts_once_every_seat_acted() {
    let mut state = exchange_table();
    exchange_done(&mut state, 1).unwrap();
    assert_eq!(state.phase, Phase::Exchange);
    exchange_done(&mut state, 2).unwrap();
    assert_eq!(state.phase, Phase::Exchange);
    exchange_done(&mut state, 0).unwrap();
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.actor, None);
}
