//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod config;
pub mod dealing;
pub mod exchange;
pub mod partner;
pub mod player_view;
pub mod round_memory;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub(crate) mod test_gens;
#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_exchange_partner;
#[cfg(test)]
mod tests_props_consistency;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use actions::{apply_action, is_terminal, legal_actions, score_of, Action, ActionKey, ActionResult};
pub use bidding::{Auction, Bid};
pub use cards_logic::{count_points, hand_has_suit};
pub use cards_types::{Card, Rank, Suit, Trump};
pub use config::{FirstLead, GameConfig, ScoringConfig};
pub use dealing::{deal_hands, Deal};
pub use partner::PartnerCall;
pub use player_view::{InformationSet, InformationSetBuilder};
pub use round_memory::SeatKnowledge;
pub use scoring::{GameResult, Outcome, RedealReason};
pub use seed_derivation::{derive_agent_seed, derive_dealing_seed, derive_worker_seed};
pub use state::{Contract, GameState, LoggedAction, Phase, Seat, Trick};
