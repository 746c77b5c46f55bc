//! Information-set Monte Carlo tree search.

mod search;
mod tree;

pub use search::{
    group_by_key, rewards_from_payouts, run_search, static_estimate, Search, SearchReport,
};
pub use tree::{Edge, EdgeStats, Node, NodeId, SearchTree};
