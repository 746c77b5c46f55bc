//! In-memory game runner for agent evaluation.
//!
//! Every agent acts only on its own [`InformationSet`]; the full state never
//! leaves this module. Games are dealt from seeds derived from one base seed
//! so a run can be replayed.

use mighty_engine::ai::{create_policy, visible_state, Decider, PlayoutPolicy};
use mighty_engine::domain::rules::PLAYERS;
use mighty_engine::domain::{
    deal_hands, derive_agent_seed, derive_dealing_seed, score_of, Action, GameConfig, GameState,
    InformationSet, Outcome, Seat,
};
use mighty_engine::{EngineError, RulesError, SearchBudget, SearchConfig};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::types::AgentKind;

/// A complete game takes well under this many actions.
const MAX_ACTIONS_PER_GAME: usize = 200;

/// Search settings shared by every ISMCTS seat.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub iterations: u64,
    pub threads: Option<usize>,
    pub rollout_policy: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            iterations: 500,
            threads: None,
            rollout_policy: "random".to_string(),
        }
    }
}

enum Engine {
    Search {
        config: SearchConfig,
        budget: SearchBudget,
    },
    Policy(Box<dyn PlayoutPolicy>),
}

/// One seat's player for one game.
pub struct Agent {
    kind: AgentKind,
    engine: Engine,
    rng: ChaCha8Rng,
}

/// What an agent did on one turn.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub action: Action,
    pub iterations: u64,
    pub fallback: bool,
}

impl Agent {
    pub fn new(kind: AgentKind, settings: &AgentSettings, seed: u64) -> Result<Self, SimulatorError> {
        let engine = match kind {
            AgentKind::Ismcts => Engine::Search {
                config: SearchConfig {
                    threads: settings.threads,
                    policy: settings.rollout_policy.clone(),
                    ..SearchConfig::default()
                },
                budget: SearchBudget::iterations(settings.iterations),
            },
            AgentKind::Heuristic | AgentKind::Random => Engine::Policy(
                create_policy(kind.name()).ok_or(SimulatorError::UnknownPolicy(kind.name()))?,
            ),
        };
        Ok(Self {
            kind,
            engine,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn act(&mut self, info: &InformationSet) -> Result<Move, EngineError> {
        match &self.engine {
            Engine::Search { config, budget } => {
                let decider = Decider::new(SearchConfig {
                    seed: Some(self.rng.next_u64()),
                    ..config.clone()
                });
                let decision = decider.decide_with_report(info, *budget)?;
                Ok(Move {
                    action: decision.action,
                    iterations: decision.iterations(),
                    fallback: decision.is_fallback(),
                })
            }
            Engine::Policy(policy) => {
                let legal = info.legal_actions();
                let action = policy.choose(&visible_state(info), &legal, &mut self.rng)?;
                Ok(Move {
                    action,
                    iterations: 0,
                    fallback: false,
                })
            }
        }
    }
}

/// Per-seat counters for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatStats {
    pub decisions: u32,
    pub search_iterations: u64,
    pub fallbacks: u32,
}

impl SeatStats {
    fn record(&mut self, mv: &Move) {
        self.decisions += 1;
        self.search_iterations += mv.iterations;
        self.fallbacks += mv.fallback as u32;
    }
}

/// Result of simulating one complete game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game_no: u32,
    pub dealing_seed: u64,
    pub dealer: Seat,
    pub outcome: Outcome,
    pub payouts: [i32; PLAYERS],
    pub actions: usize,
    pub seats: [SeatStats; PLAYERS],
}

impl GameRecord {
    /// `Some(made)` for a played-out contract, `None` for a redeal.
    pub fn declarer_made(&self) -> Option<bool> {
        match self.outcome {
            Outcome::Scored(result) => Some(result.made),
            Outcome::Redeal(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("unknown playout policy '{0}'")]
    UnknownPolicy(&'static str),
    #[error("agent at seat {seat} failed: {source}")]
    Agent { seat: Seat, source: EngineError },
    #[error("seat {seat} chose {action:?}, rejected: {source}")]
    Rules {
        seat: Seat,
        action: Action,
        source: RulesError,
    },
    #[error("game {0} did not finish within {MAX_ACTIONS_PER_GAME} actions")]
    Stalled(u32),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Runs games for a fixed line-up.
pub struct Simulator {
    config: GameConfig,
    line_up: [AgentKind; PLAYERS],
    settings: AgentSettings,
    base_seed: u64,
}

impl Simulator {
    pub fn new(line_up: [AgentKind; PLAYERS], settings: AgentSettings, base_seed: u64) -> Self {
        Self {
            config: GameConfig::default(),
            line_up,
            settings,
            base_seed,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn line_up(&self) -> &[AgentKind; PLAYERS] {
        &self.line_up
    }

    /// Play game `game_no` (1-based). The dealer rotates each game.
    pub fn play_game(&self, game_no: u32) -> Result<GameRecord, SimulatorError> {
        let dealing_seed = derive_dealing_seed(self.base_seed, game_no);
        let dealer = (game_no.saturating_sub(1) % PLAYERS as u32) as Seat;

        let mut agents = Vec::with_capacity(PLAYERS);
        for (seat, kind) in self.line_up.iter().enumerate() {
            let seed = derive_agent_seed(self.base_seed, game_no, seat as u8);
            agents.push(Agent::new(*kind, &self.settings, seed)?);
        }

        let mut state = GameState::new(self.config, dealer, deal_hands(dealing_seed));
        let mut seats = [SeatStats::default(); PLAYERS];
        let mut actions = 0usize;

        while let Some(seat) = state.turn {
            if actions >= MAX_ACTIONS_PER_GAME {
                return Err(SimulatorError::Stalled(game_no));
            }
            let info = InformationSet::from_state(&state, seat);
            let mv = agents[seat as usize]
                .act(&info)
                .map_err(|source| SimulatorError::Agent { seat, source })?;
            state
                .apply(&mv.action)
                .map_err(|source| SimulatorError::Rules {
                    seat,
                    action: mv.action,
                    source,
                })?;
            seats[seat as usize].record(&mv);
            actions += 1;
        }

        let outcome = state
            .outcome
            .ok_or_else(|| SimulatorError::InvalidState("finished without an outcome".into()))?;
        let payouts = score_of(&state).map_err(|e| SimulatorError::InvalidState(e.to_string()))?;
        debug!(game_no, dealer, actions, ?payouts, "Game finished");

        Ok(GameRecord {
            game_no,
            dealing_seed,
            dealer,
            outcome,
            payouts,
            actions,
            seats,
        })
    }
}
