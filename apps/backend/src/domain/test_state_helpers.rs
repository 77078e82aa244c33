//! Test-only table builders for domain unit tests.

use uuid::Uuid;

use crate::domain::auction;
use crate::domain::hand;
use crate::domain::state::{Phase, StartChoice, TableState};

/// Table with `seat_count` seats, the given seats occupied, and a fixed seed.
pub fn make_table(seat_count: usize, occupied: &[usize]) -> TableState {
    make_table_with_seed(seat_count, occupied, 12345)
}

pub fn make_table_with_seed(seat_count: usize, occupied: &[usize], seed: u64) -> TableState {
    let mut state = TableState::new(seat_count, seed).expect("valid seat count");
    for &i in occupied {
        state
            .join(Uuid::new_v4(), &format!("p{i}"), Some(i))
            .expect("seat free");
    }
    state
}

/// Knock-free opening: cut then deal, leaving the table in Bidding.
pub fn advance_to_bidding(state: &mut TableState) {
    hand::start_choice(state, state.first_bidder, StartChoice::Cut).expect("start choice");
    hand::cut_proceed(state, state.first_bidder).expect("deal");
    assert_eq!(state.phase, Phase::Bidding);
}

/// The first bidder takes the auction at `bid`; everyone else passes.
/// Leaves the table in PickTrump (bid >= 2) or Exchange (hearts call).
pub fn auction_to_declarer(state: &mut TableState, bid: u8) {
    let fb = state.first_bidder;
    auction::bid(state, fb, bid).expect("opening bid");
    while state.phase == Phase::Bidding {
        let actor = state.actor.expect("auction actor");
        auction::pass(state, actor).expect("pass");
    }
    assert_eq!(state.best_by, Some(fb));
}
