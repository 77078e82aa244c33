//! Domain layer: pure game logic types and helpers.

pub mod auction;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod exchange;
pub mod hand;
pub mod rules;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_state_helpers;

#[cfg(test)]
mod tests_exchange;
#[cfg(test)]
mod tests_hand;
#[cfg(test)]
mod tests_props_consistency;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, counts_as_lead, hand_has_lead};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use deck::{cut_deck, full_deck, shuffle_with_seed};
pub use seed_derivation::{derive_cut_seed, derive_shuffle_seed, derive_swamp_seed};
pub use snapshot::{project_for_seat, TableSnapshot};
pub use state::{Phase, StartChoice, TableState};
