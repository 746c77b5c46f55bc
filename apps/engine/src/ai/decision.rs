//! The decision entry point: one information set in, one legal action out.
//!
//! A [`Decider`] owns a resolved [`SearchConfig`] and its playout policy.
//! Invalid requests (terminal view, another seat's turn, inconsistent card
//! counts) are rejected with [`EngineError::InvalidInformationSet`]. When the
//! seat has exactly one legal action it is returned without searching. If the
//! search itself fails internally, the playout policy picks from the seat's
//! own view instead and the failure is logged.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::ai::config::{SearchBudget, SearchConfig};
use crate::ai::determinizer::visible_state;
use crate::ai::ismcts::{run_search, SearchReport};
use crate::ai::random::RandomPolicy;
use crate::ai::registry::create_policy;
use crate::ai::trait_def::PlayoutPolicy;
use crate::domain::{Action, InformationSet};
use crate::error::EngineError;

/// How a decision was reached.
#[derive(Debug, Clone)]
pub enum DecisionSource {
    /// Only one legal action.
    Forced,
    Search(SearchReport),
    /// The search failed; the playout policy chose.
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub action: Action,
    pub source: DecisionSource,
}

impl Decision {
    /// Search iterations spent on this decision.
    pub fn iterations(&self) -> u64 {
        match &self.source {
            DecisionSource::Search(report) => report.iterations,
            _ => 0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DecisionSource::Fallback { .. })
    }
}

pub struct Decider {
    config: SearchConfig,
    policy: Box<dyn PlayoutPolicy>,
}

impl std::fmt::Debug for Decider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decider")
            .field("config", &self.config)
            .field("policy", &self.policy.name())
            .finish()
    }
}

impl Default for Decider {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Decider {
    /// Resolve `config.policy` through the registry. Unknown names fall back
    /// to [`RandomPolicy`].
    pub fn new(config: SearchConfig) -> Self {
        let policy = create_policy(&config.policy).unwrap_or_else(|| {
            warn!(
                policy = %config.policy,
                fallback = RandomPolicy::NAME,
                "Unknown playout policy, using fallback"
            );
            Box::new(RandomPolicy::new())
        });
        Self { config, policy }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Choose an action for `info.seat`.
    pub fn decide(
        &self,
        info: &InformationSet,
        budget: SearchBudget,
    ) -> Result<Action, EngineError> {
        self.decide_with_report(info, budget).map(|d| d.action)
    }

    /// [`decide`](Self::decide), also reporting how the action was found.
    pub fn decide_with_report(
        &self,
        info: &InformationSet,
        budget: SearchBudget,
    ) -> Result<Decision, EngineError> {
        info.validate()?;
        if info.is_terminal() {
            return Err(EngineError::invalid_info_set("the game is over"));
        }
        if info.turn != Some(info.seat) {
            return Err(EngineError::invalid_info_set(format!(
                "seat {} is not to act (turn: {:?})",
                info.seat, info.turn
            )));
        }

        let legal = info.legal_actions();
        match legal.as_slice() {
            [] => return Err(EngineError::NoLegalActions),
            [only] => {
                debug!(seat = info.seat, action = ?only, "Forced action");
                return Ok(Decision {
                    action: *only,
                    source: DecisionSource::Forced,
                });
            }
            _ => {}
        }

        match run_search(info, &self.config, self.policy.as_ref(), budget) {
            Ok(report) => Ok(Decision {
                action: report.action,
                source: DecisionSource::Search(report),
            }),
            Err(err) if err.is_search_internal() => {
                warn!(
                    seat = info.seat,
                    phase = ?info.phase,
                    error = %err,
                    policy = self.policy.name(),
                    "Search failed, falling back to playout policy"
                );
                let action = self.fallback(info, &legal)?;
                Ok(Decision {
                    action,
                    source: DecisionSource::Fallback {
                        reason: err.to_string(),
                    },
                })
            }
            Err(err) => Err(err),
        }
    }

    fn fallback(&self, info: &InformationSet, legal: &[Action]) -> Result<Action, EngineError> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let action = self.policy.choose(&visible_state(info), legal, &mut rng)?;
        if !legal.contains(&action) {
            return Err(EngineError::internal(format!(
                "policy {} chose illegal {action:?}",
                self.policy.name()
            )));
        }
        Ok(action)
    }
}

/// Decide with the default configuration.
pub fn decide(info: &InformationSet, budget: SearchBudget) -> Result<Action, EngineError> {
    Decider::default().decide(info, budget)
}
