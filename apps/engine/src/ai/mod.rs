//! Automated decisions for one seat.
//!
//! This module provides:
//! - [`PlayoutPolicy`]: the policy trait used in simulation and as fallback
//! - [`RandomPolicy`] and [`HeuristicPolicy`], registered by name
//! - The determinizer that samples hidden cards for a seat's view
//! - ISMCTS over a shared tree with parallel workers
//! - [`Decider`] / [`decide`]: the entry point an outer layer calls

pub mod config;
pub mod decision;
pub mod determinizer;
mod heuristic;
pub mod ismcts;
mod random;
pub mod registry;
mod trait_def;

pub use config::{RewardMode, SearchBudget, SearchConfig};
pub use decision::{decide, Decider, Decision, DecisionSource};
pub use determinizer::{determinize, determinize_seeded, visible_state, Determinizer};
pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;
pub use registry::{create_policy, registered_policies};
pub use trait_def::PlayoutPolicy;
