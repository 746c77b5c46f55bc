//! Uniform random playout policy.
//!
//! [`RandomPolicy`] is the default simulation policy and the baseline the
//! other policies are measured against. It holds no state: all randomness
//! comes from the RNG the caller passes in, so a seeded search replays the
//! same playouts.

use rand::prelude::*;
use rand::RngCore;

use super::trait_def::PlayoutPolicy;
use crate::domain::{Action, GameState};
use crate::error::EngineError;

/// Chooses uniformly among the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn new() -> Self {
        Self
    }
}

impl PlayoutPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose(
        &self,
        _state: &GameState,
        legal: &[Action],
        mut rng: &mut dyn RngCore,
    ) -> Result<Action, EngineError> {
        legal
            .choose(&mut rng)
            .copied()
            .ok_or(EngineError::NoLegalActions)
    }
}
