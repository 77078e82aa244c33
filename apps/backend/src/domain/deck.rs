//! Deck construction, deterministic shuffling, and the cut.

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::rules::DECK_SIZE;

/// Generate the full 33-card deck in canonical order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::suited(suit, rank));
        }
    }
    deck.push(Card::Weli);
    deck
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // SplitMix64: well-distributed 64-bit generator.
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Compute largest multiple of m that fits in u64 to avoid modulo bias.
        // Values >= limit are discarded using rejection sampling.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Cut the shuffled deck: lift a packet off the top, reveal the bottom card
/// of the lifted packet, and complete the cut. Index 0 is the top of the
/// deck; dealing draws from the front.
pub fn cut_deck(deck: &mut [Card], seed: u64) -> Card {
    let mut rng = SimpleLcg::new(seed);
    // At least one card is lifted and at least one stays down.
    let k = 1 + rng.next_range(deck.len() - 1);
    let peek = deck[k - 1];
    deck.rotate_left(k);
    peek
}
