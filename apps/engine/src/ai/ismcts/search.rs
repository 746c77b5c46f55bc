//! The ISMCTS loop: determinize, select, expand, simulate, backpropagate.
//!
//! Every iteration samples a fresh concrete state from the root information
//! set and walks the shared tree with it. Edges are keyed by [`ActionKey`] as
//! the searching seat observes them, so determinizations that differ only in
//! hidden cards share nodes. An edge only competes in selection when its key
//! is legal in the current determinization, and its availability counter
//! tracks how often that was the case.
//!
//! Workers run on scoped threads, claim iterations from a shared ticket
//! counter and each own a ChaCha8 stream derived from the base seed. A
//! worker error raises the abort flag; the first error is reported.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::tree::{EdgeStats, Node, SearchTree};
use crate::ai::config::{RewardMode, SearchBudget, SearchConfig};
use crate::ai::determinizer::Determinizer;
use crate::ai::trait_def::PlayoutPolicy;
use crate::domain::rules::{PLAYERS, TOTAL_POINTS};
use crate::domain::scoring::declarer_team_points;
use crate::domain::{
    derive_worker_seed, is_terminal, score_of, Action, ActionKey, GameState, InformationSet,
    Seat,
};
use crate::error::EngineError;

/// What a finished search found.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub action: Action,
    /// Iterations that completed and were backpropagated.
    pub iterations: u64,
    pub root_visits: u32,
    pub elapsed: Duration,
    pub tree_nodes: usize,
    /// Root edges in key order.
    pub root: Vec<EdgeStats>,
}

/// Legal actions grouped by how `observer` sees them. Keys iterate in their
/// stable order.
pub fn group_by_key(
    legal: Vec<Action>,
    actor: Seat,
    observer: Seat,
) -> BTreeMap<ActionKey, Vec<Action>> {
    let mut groups: BTreeMap<ActionKey, Vec<Action>> = BTreeMap::new();
    for action in legal {
        groups
            .entry(ActionKey::observe(&action, actor, observer))
            .or_default()
            .push(action);
    }
    groups
}

/// Per-seat rewards for final payouts.
pub fn rewards_from_payouts(
    payouts: [i32; PLAYERS],
    mode: RewardMode,
    scale: f64,
) -> [f64; PLAYERS] {
    payouts.map(|p| match mode {
        RewardMode::Scaled if scale > 0.0 => (p as f64 / scale).clamp(-1.0, 1.0),
        RewardMode::WinLoss | RewardMode::Scaled => p.signum() as f64,
    })
}

/// Heuristic value of a cut-off playout: how far the declarer team's share of
/// captured points sits above or below the share its target needs.
pub fn static_estimate(state: &GameState) -> [f64; PLAYERS] {
    let Some(contract) = state.contract else {
        return [0.0; PLAYERS];
    };
    let captured: u32 = state.points_won.iter().map(|p| *p as u32).sum();
    if captured == 0 {
        return [0.0; PLAYERS];
    }
    let share = declarer_team_points(state, &contract) as f64 / captured as f64;
    let needed = contract.target as f64 / TOTAL_POINTS as f64;
    let margin = ((share - needed) * 4.0).clamp(-1.0, 1.0);

    let mut out = [-margin; PLAYERS];
    out[contract.declarer as usize] = margin;
    if let Some(p) = state.partner {
        out[p as usize] = margin;
    }
    out
}

struct Control {
    tickets: AtomicU64,
    completed: AtomicU64,
    abort: AtomicBool,
    error: Mutex<Option<EngineError>>,
    limit: Option<u64>,
    deadline: Option<Instant>,
}

impl Control {
    fn fail(&self, err: EngineError) {
        self.abort.store(true, Ordering::Release);
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}

/// One search run over a fresh tree.
pub struct Search<'a> {
    info: &'a InformationSet,
    determinizer: Determinizer<'a>,
    config: &'a SearchConfig,
    policy: &'a dyn PlayoutPolicy,
    tree: SearchTree,
}

impl<'a> Search<'a> {
    pub fn new(
        info: &'a InformationSet,
        config: &'a SearchConfig,
        policy: &'a dyn PlayoutPolicy,
    ) -> Result<Self, EngineError> {
        if info.turn != Some(info.seat) {
            return Err(EngineError::invalid_info_set(format!(
                "seat {} is not to act",
                info.seat
            )));
        }
        Ok(Self {
            info,
            determinizer: Determinizer::new(info)?,
            config,
            policy,
            tree: SearchTree::new(),
        })
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Run until the budget is spent, then pick the root action.
    pub fn run(&self, budget: SearchBudget) -> Result<SearchReport, EngineError> {
        let budget = if budget.iterations.is_none() && budget.time.is_none() {
            SearchBudget::default()
        } else {
            budget
        };
        let started = Instant::now();
        let control = Control {
            tickets: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            abort: AtomicBool::new(false),
            error: Mutex::new(None),
            limit: budget.iterations,
            deadline: budget.time.map(|t| started + t),
        };
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let threads = self.config.thread_count();

        std::thread::scope(|scope| {
            for worker in 0..threads {
                let control = &control;
                scope.spawn(move || self.worker(worker, base_seed, control));
            }
        });

        if let Some(err) = control.error.lock().take() {
            return Err(err);
        }

        let iterations = control.completed.load(Ordering::Acquire);
        let root = self.tree.root()?;
        let root_stats = root.stats();
        let key = best_key(&root_stats)
            .ok_or_else(|| EngineError::internal("search finished without expanding the root"))?;
        let action = self
            .info
            .legal_actions()
            .into_iter()
            .find(|a| ActionKey::observe(a, self.info.seat, self.info.seat) == key)
            .ok_or_else(|| EngineError::internal(format!("root key {key:?} is not a legal action")))?;

        let report = SearchReport {
            action,
            iterations,
            root_visits: root.visits(),
            elapsed: started.elapsed(),
            tree_nodes: self.tree.len(),
            root: root_stats,
        };
        debug!(
            seat = self.info.seat,
            iterations,
            threads,
            tree_nodes = report.tree_nodes,
            elapsed_ms = report.elapsed.as_millis() as u64,
            action = ?report.action,
            "ISMCTS search finished"
        );
        Ok(report)
    }

    fn worker(&self, worker: usize, base_seed: u64, control: &Control) {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_worker_seed(base_seed, worker));
        loop {
            if control.abort.load(Ordering::Acquire) {
                break;
            }
            if control.deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            let ticket = control.tickets.fetch_add(1, Ordering::AcqRel);
            if control.limit.is_some_and(|n| ticket >= n) {
                break;
            }
            match self.iterate(&mut rng) {
                Ok(()) => {
                    control.completed.fetch_add(1, Ordering::AcqRel);
                }
                Err(err) => {
                    debug!(worker, error = %err, "ISMCTS worker aborting");
                    control.fail(err);
                    break;
                }
            }
        }
    }

    fn iterate(&self, rng: &mut ChaCha8Rng) -> Result<(), EngineError> {
        let observer = self.info.seat;
        let mut state = self.determinizer.sample(rng)?;
        let mut node = self.tree.root()?;
        let mut path: Vec<(Arc<Node>, ActionKey, Seat)> = Vec::new();
        let mut expanded = false;

        while !expanded && !is_terminal(&state) {
            let actor = state
                .turn
                .ok_or_else(|| EngineError::internal("live state without a seat to act"))?;
            let groups = group_by_key(state.legal_actions(), actor, observer);
            if groups.is_empty() {
                return Err(EngineError::internal(format!(
                    "no legal actions in {:?}",
                    state.phase
                )));
            }
            node.visit();

            let untried: Vec<ActionKey> = {
                let edges = node.edges();
                groups
                    .keys()
                    .filter(|k| !edges.iter().any(|e| e.key == **k))
                    .copied()
                    .collect()
            };
            let key = match untried.choose(rng) {
                Some(key) => {
                    expanded = true;
                    *key
                }
                None => self.select(&node, &groups)?,
            };
            let (child, _) = self.tree.expand(&node, key)?;
            for edge in node.edges().iter() {
                if groups.contains_key(&edge.key) {
                    edge.mark_available();
                }
            }

            let group = groups
                .get(&key)
                .ok_or_else(|| EngineError::internal("selected key has no actions"))?;
            let action = match group.as_slice() {
                [only] => *only,
                many => self.policy.choose(&state, many, rng)?,
            };
            state.apply(&action).map_err(|err| {
                EngineError::internal(format!("tree action {action:?} rejected: {err}"))
            })?;
            path.push((node, key, actor));
            node = self.tree.node(child)?;
        }

        let rewards = self.simulate(state, rng)?;
        for (node, key, actor) in &path {
            node.record(key, rewards[*actor as usize])?;
        }
        Ok(())
    }

    /// Highest UCB among edges legal in this determinization; ties go to the
    /// smaller key.
    fn select(
        &self,
        node: &Node,
        groups: &BTreeMap<ActionKey, Vec<Action>>,
    ) -> Result<ActionKey, EngineError> {
        let edges = node.edges();
        let mut best: Option<(f64, ActionKey)> = None;
        for edge in edges.iter().filter(|e| groups.contains_key(&e.key)) {
            let score = edge.ucb(self.config.exploration);
            let better = match best {
                None => true,
                Some((b, k)) => score > b || (score == b && edge.key < k),
            };
            if better {
                best = Some((score, edge.key));
            }
        }
        best.map(|(_, k)| k)
            .ok_or_else(|| EngineError::internal("no available edge to select"))
    }

    fn simulate(
        &self,
        mut state: GameState,
        rng: &mut ChaCha8Rng,
    ) -> Result<[f64; PLAYERS], EngineError> {
        let mut steps = 0u32;
        while !is_terminal(&state) {
            if self.config.rollout_depth.is_some_and(|d| steps >= d) {
                return Ok(static_estimate(&state));
            }
            let legal = state.legal_actions();
            let action = self.policy.choose(&state, &legal, rng)?;
            state.apply(&action).map_err(|err| {
                EngineError::internal(format!("playout action {action:?} rejected: {err}"))
            })?;
            steps += 1;
        }
        let payouts = score_of(&state)
            .map_err(|err| EngineError::internal(format!("playout did not settle: {err}")))?;
        Ok(rewards_from_payouts(
            payouts,
            self.config.reward,
            self.config.reward_scale,
        ))
    }
}

/// Most visits, then highest mean, then the smaller key.
fn best_key(stats: &[EdgeStats]) -> Option<ActionKey> {
    stats
        .iter()
        .max_by(|a, b| {
            a.visits
                .cmp(&b.visits)
                .then(a.mean.total_cmp(&b.mean))
                .then(b.key.cmp(&a.key))
        })
        .map(|s| s.key)
}

/// Build a fresh tree for `info` and search it.
pub fn run_search(
    info: &InformationSet,
    config: &SearchConfig,
    policy: &dyn PlayoutPolicy,
    budget: SearchBudget,
) -> Result<SearchReport, EngineError> {
    Search::new(info, config, policy)?.run(budget)
}
