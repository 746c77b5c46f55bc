//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game.
    Jsonl,
    /// A single JSON array written at the end.
    Json,
}

/// Who sits in a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// ISMCTS through `Decider`.
    Ismcts,
    /// The heuristic playout policy, acting on its own view.
    Heuristic,
    /// Uniformly random legal actions.
    Random,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Ismcts => "ismcts",
            AgentKind::Heuristic => "heuristic",
            AgentKind::Random => "random",
        }
    }
}
