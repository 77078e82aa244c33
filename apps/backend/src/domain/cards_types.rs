//! Core card-related types: Card, Rank, Suit

/// William Tell pattern suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Acorns,
    Leaves,
    Hearts,
    Bells,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Acorns, Suit::Leaves, Suit::Hearts, Suit::Bells];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Suited { suit: Suit, rank: Rank },
    /// The single permanent trump, bound to Bells.
    Weli,
}

impl Card {
    pub const fn suited(suit: Suit, rank: Rank) -> Self {
        Card::Suited { suit, rank }
    }

    /// Printed suit. The Weli has none here; its lead-suit membership is
    /// decided by `cards_logic::counts_as_lead`.
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Suited { suit, .. } => Some(*suit),
            Card::Weli => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Suited { rank, .. } => Some(*rank),
            Card::Weli => None,
        }
    }

    /// The Weli is trump under every trump suit.
    pub fn is_trump(&self, trump: Suit) -> bool {
        match self {
            Card::Weli => true,
            Card::Suited { suit, .. } => *suit == trump,
        }
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit order then rank order,
// with the Weli after every suited card. Do not use for trick resolution or
// game logic comparisons involving trump/lead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Card::Weli, Card::Weli) => std::cmp::Ordering::Equal,
            (Card::Weli, Card::Suited { .. }) => std::cmp::Ordering::Greater,
            (Card::Suited { .. }, Card::Weli) => std::cmp::Ordering::Less,
            (
                Card::Suited { suit: sa, rank: ra },
                Card::Suited { suit: sb, rank: rb },
            ) => match sa.cmp(sb) {
                std::cmp::Ordering::Equal => ra.cmp(rb),
                ord => ord,
            },
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
