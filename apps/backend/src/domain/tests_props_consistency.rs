//! Property tests for the card-location invariant and auction monotonicity.

use proptest::prelude::*;

use crate::domain::auction::{self, pick_trump};
use crate::domain::exchange::{exchange_cards, exchange_done, stay_home};
use crate::domain::state::{card_census, Phase};
use crate::domain::test_state_helpers::{
    advance_to_bidding, auction_to_declarer, make_table_with_seed,
};
use crate::domain::{full_deck, Card, Suit};

fn full_deck_sorted() -> Vec<Card> {
    let mut deck = full_deck();
    deck.sort();
    deck
}

proptest! {
    /// The multiset of all tracked cards equals one full 33-card deck at
    /// every step from the deal through an arbitrary exchange round.
    #[test]
    fn deck_stays_whole_through_deal_and_exchange(
        seed in any::<u64>(),
        seat_count in 2usize..=6,
        choices in proptest::collection::vec((0u8..3, 1usize..=5), 8),
    ) {
        let occupied: Vec<usize> = (0..seat_count).collect();
        let mut state = make_table_with_seed(seat_count, &occupied, seed);
        advance_to_bidding(&mut state);

        let mut census = card_census(&state);
        census.sort();
        prop_assert_eq!(census, full_deck_sorted());

        auction_to_declarer(&mut state, 2);
        if state.phase == Phase::PickTrump {
            let declarer = state.best_by.unwrap();
            pick_trump(&mut state, declarer, Suit::Bells).unwrap();
        }

        let mut step = 0usize;
        while state.phase == Phase::Exchange {
            let actor = state.actor.unwrap();
            let (kind, count) = choices[step % choices.len()];
            step += 1;
            let hand_len = state.seats[actor].hand.len();
            match kind {
                0 if hand_len > 0 => {
                    let k = count.min(hand_len);
                    let cards: Vec<Card> = state.seats[actor].hand[..k].to_vec();
                    exchange_cards(&mut state, actor, &cards).unwrap();
                }
                1 => {
                    if stay_home(&mut state, actor).is_err() {
                        exchange_done(&mut state, actor).unwrap();
                    }
                }
                _ => exchange_done(&mut state, actor).unwrap(),
            }

            let mut census = card_census(&state);
            census.sort();
            prop_assert_eq!(census, full_deck_sorted());
        }
        prop_assert_eq!(state.phase, Phase::Play);
    }

    /// `best_bid` never decreases, whatever mix of bids and passes arrives.
    #[test]
    fn best_bid_is_monotonic(
        seed in any::<u64>(),
        actions in proptest::collection::vec(0u8..=7, 2..24),
    ) {
        let mut state = make_table_with_seed(3, &[0, 1, 2], seed);
        advance_to_bidding(&mut state);

        for value in actions {
            if state.phase != Phase::Bidding {
                break;
            }
            let actor = state.actor.unwrap();
            let before = state.best_bid;
            let result = if value == 0 {
                auction::pass(&mut state, actor)
            } else {
                auction::bid(&mut state, actor, value)
            };
            if result.is_ok() && value > 0 {
                prop_assert!(value > before);
                prop_assert_eq!(state.best_by, Some(actor));
            }
            prop_assert!(state.best_bid >= before);
        }
    }
}
