//! Search configuration handling.
//!
//! [`SearchConfig`] carries the tunables of one ISMCTS run. It deserialises
//! from the JSON an API layer stores per AI profile; unknown fields are kept
//! in `custom` so profiles can carry policy-specific knobs.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "exploration": 0.7,
//!   "rollout_depth": 30,
//!   "threads": 4,
//!   "seed": 12345,
//!   "reward": "SCALED",
//!   "policy": "heuristic"
//! }
//! ```
//!
//! ```rust,ignore
//! let config = SearchConfig::from_json(profile.config.as_ref());
//! let budget = SearchBudget::iterations(2_000);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::ai::random::RandomPolicy;

/// How a finished playout is turned into a reward for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardMode {
    /// +1 for a positive payout, -1 for a negative one, 0 otherwise.
    #[default]
    WinLoss,
    /// Payout divided by `reward_scale`, clamped to [-1, 1].
    Scaled,
}

/// Tunables for one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Cut playouts off after this many actions and score them statically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout_depth: Option<u32>,
    /// Worker threads sharing the tree. Defaults to the number of CPUs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Base seed; worker seeds are derived from it. Entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub reward: RewardMode,
    /// Divisor for [`RewardMode::Scaled`].
    pub reward_scale: f64,
    /// Registered playout policy name.
    pub policy: String,
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            rollout_depth: None,
            threads: None,
            seed: None,
            reward: RewardMode::WinLoss,
            reward_scale: 20.0,
            policy: RandomPolicy::NAME.to_string(),
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }
}

impl SearchConfig {
    /// Create a SearchConfig from optional JSON, falling back to defaults on
    /// a malformed document.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_else(|err| {
                warn!(error = %err, "Invalid search config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Single-threaded, seeded configuration (reproducible runs).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            threads: Some(1),
            ..Self::default()
        }
    }

    /// Worker count, resolving the CPU default. Never zero.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

/// When a search run stops. With both limits set, whichever is hit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub iterations: Option<u64>,
    pub time: Option<Duration>,
}

impl SearchBudget {
    pub fn iterations(n: u64) -> Self {
        Self {
            iterations: Some(n),
            time: None,
        }
    }

    pub fn time(limit: Duration) -> Self {
        Self {
            iterations: None,
            time: Some(limit),
        }
    }

    pub fn both(n: u64, limit: Duration) -> Self {
        Self {
            iterations: Some(n),
            time: Some(limit),
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::iterations(1_000)
    }
}
