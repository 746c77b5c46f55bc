#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Decision engine for five-player Mighty.
//!
//! [`domain`] holds the rules engine and the per-seat information set;
//! [`ai`] holds determinization, ISMCTS and the playout policies behind
//! [`decide`].

pub mod ai;
pub mod domain;
pub mod error;
pub mod errors;

// Re-exports for public API
pub use ai::{
    create_policy, decide, determinize, determinize_seeded, Decider, Decision, DecisionSource,
    HeuristicPolicy, PlayoutPolicy, RandomPolicy, RewardMode, SearchBudget, SearchConfig,
};
pub use domain::{
    apply_action, is_terminal, legal_actions, score_of, Action, ActionKey, Card, Contract,
    GameConfig, GameState, InformationSet, InformationSetBuilder, Phase, Seat, Suit, Trump,
};
pub use error::EngineError;
pub use errors::domain::RulesError;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::test_logging::init();
}
