//! Playout policy trait definition.

use rand::RngCore;

use crate::domain::{Action, GameState};
use crate::error::EngineError;

/// Picks actions during simulation and as the fallback when a search fails.
///
/// Implementations receive the full (determinized) state together with the
/// legal actions for the seat to act, and must return one of those actions.
/// Randomness comes from the caller's RNG so seeded searches stay
/// reproducible; policies themselves hold no mutable state.
pub trait PlayoutPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose(
        &self,
        state: &GameState,
        legal: &[Action],
        rng: &mut dyn RngCore,
    ) -> Result<Action, EngineError>;
}
