//! Shared search tree with lock-light statistics.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Each node keeps its visit
//! count in an atomic and its outgoing edges behind a `parking_lot::RwLock`.
//! Edge statistics are atomics too, so concurrent workers update them under
//! the read lock; the write lock is only taken to add an edge.
//!
//! Lock order: a node's edge list, then the arena. Never the reverse.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::ActionKey;
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Statistics for one action out of a node.
#[derive(Debug)]
pub struct Edge {
    pub key: ActionKey,
    pub child: NodeId,
    visits: AtomicU32,
    /// Iterations in which this key was legal at the parent.
    availability: AtomicU32,
    /// Sum of rewards, stored as `f64` bits.
    reward_sum: AtomicU64,
}

impl Edge {
    fn new(key: ActionKey, child: NodeId) -> Self {
        Self {
            key,
            child,
            visits: AtomicU32::new(0),
            availability: AtomicU32::new(0),
            reward_sum: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn visits(&self) -> u32 {
        self.visits.load(Ordering::Relaxed)
    }

    pub fn availability(&self) -> u32 {
        self.availability.load(Ordering::Relaxed)
    }

    pub fn reward_sum(&self) -> f64 {
        f64::from_bits(self.reward_sum.load(Ordering::Relaxed))
    }

    /// Mean reward; zero before the first visit.
    pub fn mean(&self) -> f64 {
        match self.visits() {
            0 => 0.0,
            n => self.reward_sum() / n as f64,
        }
    }

    /// UCB1 over availability counts. Unvisited edges come first.
    pub fn ucb(&self, exploration: f64) -> f64 {
        let visits = self.visits();
        if visits == 0 {
            return f64::INFINITY;
        }
        let avail = self.availability().max(1) as f64;
        self.mean() + exploration * (avail.ln() / visits as f64).sqrt()
    }

    pub fn mark_available(&self) {
        self.availability.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record(&self, reward: f64) {
        self.visits.fetch_add(1, Ordering::Relaxed);
        // f64 add via CAS
        let _ = self
            .reward_sum
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + reward).to_bits())
            });
    }
}

/// Snapshot of one edge for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStats {
    pub key: ActionKey,
    pub visits: u32,
    pub availability: u32,
    pub mean: f64,
}

impl From<&Edge> for EdgeStats {
    fn from(edge: &Edge) -> Self {
        Self {
            key: edge.key,
            visits: edge.visits(),
            availability: edge.availability(),
            mean: edge.mean(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Node {
    visits: AtomicU32,
    edges: RwLock<Vec<Edge>>,
}

impl Node {
    pub fn visits(&self) -> u32 {
        self.visits.load(Ordering::Relaxed)
    }

    pub fn visit(&self) {
        self.visits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn edges(&self) -> parking_lot::RwLockReadGuard<'_, Vec<Edge>> {
        self.edges.read()
    }

    pub fn has_edge(&self, key: &ActionKey) -> bool {
        self.edges.read().iter().any(|e| e.key == *key)
    }

    pub fn child_of(&self, key: &ActionKey) -> Option<NodeId> {
        self.edges
            .read()
            .iter()
            .find(|e| e.key == *key)
            .map(|e| e.child)
    }

    /// Credit `reward` to the edge for `key`.
    pub fn record(&self, key: &ActionKey, reward: f64) -> Result<(), EngineError> {
        let edges = self.edges.read();
        let edge = edges
            .iter()
            .find(|e| e.key == *key)
            .ok_or_else(|| EngineError::internal("backpropagating through a missing edge"))?;
        edge.record(reward);
        Ok(())
    }

    pub fn stats(&self) -> Vec<EdgeStats> {
        self.edges.read().iter().map(EdgeStats::from).collect()
    }
}

/// Arena of nodes; node 0 is the root.
#[derive(Debug)]
pub struct SearchTree {
    nodes: RwLock<Vec<Arc<Node>>>,
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(vec![Arc::new(Node::default())]),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<Arc<Node>, EngineError> {
        self.nodes
            .read()
            .get(id.0 as usize)
            .cloned()
            .ok_or_else(|| EngineError::internal(format!("unknown node {}", id.0)))
    }

    pub fn root(&self) -> Result<Arc<Node>, EngineError> {
        self.node(NodeId::ROOT)
    }

    /// Child of `parent` for `key`, creating node and edge when missing.
    /// Returns the child and whether this call created it.
    pub fn expand(&self, parent: &Node, key: ActionKey) -> Result<(NodeId, bool), EngineError> {
        let mut edges = parent.edges.write();
        if let Some(edge) = edges.iter().find(|e| e.key == key) {
            return Ok((edge.child, false));
        }
        let child = {
            let mut nodes = self.nodes.write();
            let id = u32::try_from(nodes.len())
                .map_err(|_| EngineError::internal("search tree is full"))?;
            nodes.push(Arc::new(Node::default()));
            NodeId(id)
        };
        edges.push(Edge::new(key, child));
        Ok((child, true))
    }
}
