//! Card game logic: lead-suit membership and trick comparison with the Weli.

use super::cards_types::{Card, Rank, Suit};

/// Whether `card` counts as a member of the led suit.
///
/// If the led suit is trump, every trump (Weli included) counts. Otherwise
/// only a plain card of the led suit counts; the Weli never follows a
/// non-trump lead, not even Bells.
pub fn counts_as_lead(card: Card, lead: Suit, trump: Option<Suit>) -> bool {
    match trump {
        Some(t) if lead == t => card.is_trump(t),
        _ => card.suit() == Some(lead),
    }
}

pub fn hand_has_lead(hand: &[Card], lead: Suit, trump: Option<Suit>) -> bool {
    hand.iter().any(|c| counts_as_lead(*c, lead, trump))
}

/// Strength inside the trump suit: trump-ace > Weli > trump-king > ... > trump-seven.
fn trump_power(card: Card) -> u8 {
    match card {
        Card::Suited { rank: Rank::Ace, .. } => 9,
        Card::Weli => 8,
        Card::Suited { rank, .. } => rank as u8,
    }
}

pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Option<Suit>) -> bool {
    if let Some(t) = trump {
        let a_trump = a.is_trump(t);
        let b_trump = b.is_trump(t);
        if a_trump && !b_trump {
            return true;
        }
        if b_trump && !a_trump {
            return false;
        }
        if a_trump && b_trump {
            return trump_power(a) > trump_power(b);
        }
    }
    // Neither is trump: only lead-suit cards can beat others
    let a_follows = a.suit() == Some(lead);
    let b_follows = b.suit() == Some(lead);
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank() > b.rank();
    }
    false
}
